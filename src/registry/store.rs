use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::cache::{CacheInvalidator, NoopInvalidator};
use super::descriptor::PluginDescriptor;
use super::portable::{expand, normalize_root, portabilize};

/// Default registry location, relative to the install root.
pub const REGISTRY_FILE: &str = "plugin-registrar/plugins.json";

/// Package identity -> descriptor.
pub type Registry = BTreeMap<String, PluginDescriptor>;

/// Loads and saves the registry file under an install root.
///
/// No locking is done. The host package manager runs one operation at a
/// time, and a concurrent writer would lose updates.
pub struct RegistryStore {
    install_root: PathBuf,
    path: PathBuf,
    cache: Box<dyn CacheInvalidator>,
}

impl RegistryStore {
    /// Store at the default location under `install_root`.
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self::with_file(install_root, REGISTRY_FILE)
    }

    /// Store at `relative_file` under `install_root`.
    pub fn with_file(install_root: impl Into<PathBuf>, relative_file: impl AsRef<Path>) -> Self {
        let install_root = install_root.into();
        let path = install_root.join(relative_file);
        Self {
            install_root,
            path,
            cache: Box::new(NoopInvalidator),
        }
    }

    pub fn with_cache(mut self, cache: Box<dyn CacheInvalidator>) -> Self {
        self.cache = cache;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Read the whole registry. A missing file is an empty registry.
    ///
    /// Entries are not validated beyond what deserialization requires.
    pub fn load(&self) -> Result<Registry> {
        if !self.path.is_file() {
            tracing::debug!("Registry file does not exist: {:?}", self.path);
            return Ok(Registry::new());
        }

        self.cache.invalidate(&self.path);

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read plugin registry: {:?}", self.path))?;
        let stored: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse plugin registry: {:?}", self.path))?;

        let root = normalize_root(&self.install_root);
        let registry: Registry = serde_json::from_value(expand(stored, &root))
            .with_context(|| format!("Malformed plugin registry: {:?}", self.path))?;

        tracing::debug!("Loaded {} plugin(s) from {:?}", registry.len(), self.path);
        Ok(registry)
    }

    /// Rewrite the whole registry file.
    pub fn save(&self, registry: &Registry) -> Result<()> {
        let root = normalize_root(&self.install_root);
        let stored = portabilize(serde_json::to_value(registry)?, &root);
        let mut content = serde_json::to_string_pretty(&stored)?;
        content.push('\n');

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create registry directory: {:?}", parent))?;
        }

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write plugin registry: {:?}", self.path))?;

        self.cache.invalidate(&self.path);

        tracing::debug!("Saved {} plugin(s) to {:?}", registry.len(), self.path);
        Ok(())
    }
}
