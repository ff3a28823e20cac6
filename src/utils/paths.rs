use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "plugreg.toml";

pub fn get_config_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Could not determine working directory")?;
    Ok(cwd.join(CONFIG_FILE))
}

pub fn get_data_dir() -> Result<PathBuf> {
    let data = dirs::data_local_dir().ok_or_else(|| anyhow!("Could not find data directory"))?;
    Ok(data.join("plugin-registrar"))
}

pub fn get_logs_dir() -> Result<PathBuf> {
    let data_dir = get_data_dir()?;
    Ok(data_dir.join("logs"))
}

/// Resolve `path` against the working directory without touching the
/// filesystem.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Could not resolve path: {:?}", path))
}
