use super::{ConfigFile, TransformConfig, CONFIG_FILE_NAME};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve the config path: an explicit path wins, else `<dir>/mdtransform.toml`.
    pub fn resolve_path(explicit: Option<&Path>, working_dir: &Path) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| working_dir.join(CONFIG_FILE_NAME))
    }

    /// Load transform settings with precedence: defaults, config file, env overrides.
    /// A missing file yields defaults plus env overrides.
    pub fn load(path: &Path) -> Result<TransformConfig> {
        let mut config = Self::load_from_file(path)?.unwrap_or_default();
        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Returns Ok(None) if the file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<TransformConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let parsed: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(Some(parsed.transform))
    }

    fn apply_env_overrides(config: &mut TransformConfig) -> Result<()> {
        if let Ok(verbose) = env::var("MDTRANSFORM_VERBOSE") {
            config.verbose = verbose
                .trim()
                .parse::<bool>()
                .map_err(|_| anyhow!("MDTRANSFORM_VERBOSE must be true or false"))?;
        }
        if let Ok(style) = env::var("MDTRANSFORM_DIAGRAM_STYLE") {
            config.diagram_style = style.parse().map_err(|err: String| anyhow!(err))?;
        }
        Ok(())
    }

    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "MDTRANSFORM_VERBOSE - Trace every transformation hop (true/false)",
            "MDTRANSFORM_DIAGRAM_STYLE - Default diagram style (dot/mermaid)",
            "MDTRANSFORM_LOG - Default log level when RUST_LOG is unset",
        ]
    }
}
