use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::plugin::DEFAULT_PLUGIN_TYPE;
use crate::registry::REGISTRY_FILE;
use crate::utils::paths::get_config_path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory packages are installed under
    #[serde(default = "default_install_root")]
    pub install_root: PathBuf,

    /// Package type handled as a plugin
    #[serde(default = "default_plugin_type")]
    pub plugin_type: String,

    /// Registry file, relative to the install root
    #[serde(default = "default_registry_file")]
    pub registry_file: PathBuf,
}

fn default_install_root() -> PathBuf {
    PathBuf::from("vendor")
}

fn default_plugin_type() -> String {
    DEFAULT_PLUGIN_TYPE.to_string()
}

fn default_registry_file() -> PathBuf {
    PathBuf::from(REGISTRY_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            install_root: default_install_root(),
            plugin_type: default_plugin_type(),
            registry_file: default_registry_file(),
        }
    }
}

impl Config {
    /// Load `plugreg.toml` from the working directory, or defaults.
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load an explicit config file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("Failed to parse config: {:?}", path))?;

        if config.registry_file.is_absolute() {
            anyhow::bail!(
                "registry_file must be relative to the install root: {:?}",
                config.registry_file
            );
        }

        Ok(config)
    }
}
