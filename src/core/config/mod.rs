pub mod loader;

pub use loader::ConfigLoader;

use crate::core::transform_graph::DiagramStyle;
use serde::Deserialize;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "mdtransform.toml";

/// Transformation settings loaded from the `[transform]` section of mdtransform.toml
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct TransformConfig {
    /// Trace every hop of every transformation
    #[serde(default)]
    pub verbose: bool,

    /// Style used by `mdtransform diagram` when `--style` is not given
    #[serde(default)]
    pub diagram_style: DiagramStyle,
}

/// Top-level file layout; other sections (such as `[logging]`) are read elsewhere.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub transform: TransformConfig,
}
