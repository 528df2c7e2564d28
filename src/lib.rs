pub mod cli;
pub mod core;
pub mod logging;

pub use mdtransform_types::{FileFormat, FormatSummary};

/// Current crate version string exposed for CLI and tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
