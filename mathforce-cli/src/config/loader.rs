use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mathforce_engine::EngineConfig;

use super::types::RawConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (defaults, then user, then project)
    pub fn load() -> Result<EngineConfig> {
        let mut raw = RawConfig::default();

        // Layer 1: User config
        let user_path = Self::user_config_path();
        if user_path.exists() {
            raw = raw.merge(Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = raw.merge(Self::read_raw(&project_path)?);
        }

        Ok(raw.finalize())
    }

    /// Load a single file over the defaults; a missing file yields defaults
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn load_from_path(path: &Path) -> Result<EngineConfig> {
        if !path.exists() {
            return Ok(RawConfig::default().finalize());
        }
        Ok(Self::read_raw(path)?.finalize())
    }

    /// User config path (`$XDG_CONFIG_HOME/mathforce/config.toml`)
    pub fn user_config_path() -> PathBuf {
        mathforce_paths::config_file()
    }

    /// Project config path
    /// Can be overridden with MATHFORCE_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("MATHFORCE_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".mathforce/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<RawConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("invalid config in {}", path.display()))
    }
}
