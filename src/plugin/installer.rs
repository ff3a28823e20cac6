//! Plugin installer that keeps the registry in step with installed packages.
//!
//! File placement is delegated to a [`LibraryInstaller`]. Once the files are
//! in place the registry is updated. If the package turns out not to be a
//! valid plugin, the file operation is compensated:
//! - install: the package is uninstalled again
//! - update: the files are swapped back and the previous entry restored
//!
//! Only [`InvalidPluginError`] triggers a rollback. Any other failure
//! propagates as-is.

use anyhow::Result;
use registrar_interface::{LibraryInstaller, Package};

use crate::plugin::builder::DescriptorBuilder;
use crate::plugin::error::InvalidPluginError;
use crate::registry::{PluginDescriptor, Registry, RegistryStore};

/// Package type handled by default.
pub const DEFAULT_PLUGIN_TYPE: &str = "cms-plugin";

/// Installs plugin packages and maintains the plugin registry.
pub struct PluginInstaller<L> {
    library: L,
    store: RegistryStore,
    builder: DescriptorBuilder,
    plugin_type: String,
}

impl<L: LibraryInstaller> PluginInstaller<L> {
    pub fn new(library: L, store: RegistryStore) -> Self {
        Self {
            library,
            store,
            builder: DescriptorBuilder::default(),
            plugin_type: DEFAULT_PLUGIN_TYPE.to_string(),
        }
    }

    pub fn with_builder(mut self, builder: DescriptorBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_plugin_type(mut self, plugin_type: impl Into<String>) -> Self {
        self.plugin_type = plugin_type.into();
        self
    }

    /// Whether packages of `package_type` are handled by this installer.
    pub fn supports(&self, package_type: &str) -> bool {
        package_type == self.plugin_type
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// Install the package files, then register the plugin.
    pub fn install(&mut self, package: &L::Package) -> Result<()> {
        self.library.install(package)?;

        if let Err(err) = self.add_plugin(package) {
            if err.is::<InvalidPluginError>() {
                tracing::warn!(
                    "Rolling back install of '{}': {}",
                    package.pretty_name(),
                    err
                );
                self.library.uninstall(package)?;
            }
            return Err(err);
        }

        tracing::info!(
            "Installed plugin '{}' v{}",
            package.pretty_name(),
            package.pretty_version()
        );
        Ok(())
    }

    /// Update the package files from `initial` to `target`, then replace the
    /// registry entry.
    pub fn update(&mut self, initial: &L::Package, target: &L::Package) -> Result<()> {
        self.library.update(initial, target)?;

        let previous = self.remove_plugin(initial)?;

        if let Err(err) = self.add_plugin(target) {
            if err.is::<InvalidPluginError>() {
                tracing::warn!(
                    "Rolling back update of '{}' to v{}: {}",
                    initial.pretty_name(),
                    target.pretty_version(),
                    err
                );
                self.library.update(target, initial)?;
                if let Some(descriptor) = previous {
                    self.register_plugin(initial.name(), descriptor)?;
                }
            }
            return Err(err);
        }

        tracing::info!(
            "Updated plugin '{}' from v{} to v{}",
            target.pretty_name(),
            initial.pretty_version(),
            target.pretty_version()
        );
        Ok(())
    }

    /// Remove the package files, then drop the registry entry if present.
    pub fn uninstall(&mut self, package: &L::Package) -> Result<()> {
        self.library.uninstall(package)?;
        self.remove_plugin(package)?;

        tracing::info!("Uninstalled plugin '{}'", package.pretty_name());
        Ok(())
    }

    /// Build the descriptor for `package` and register it.
    ///
    /// Fails with [`InvalidPluginError`] (inside the `anyhow::Error`) when the
    /// package is not a valid plugin.
    pub fn add_plugin(&self, package: &L::Package) -> Result<PluginDescriptor> {
        let install_path = self.library.install_path(package);
        let descriptor = self.builder.build(package, &install_path)?;
        self.register_plugin(package.name(), descriptor.clone())?;
        Ok(descriptor)
    }

    /// Insert or overwrite the entry for `key`.
    pub fn register_plugin(&self, key: &str, descriptor: PluginDescriptor) -> Result<()> {
        let mut plugins = self.store.load()?;
        plugins.insert(key.to_string(), descriptor);
        self.store.save(&plugins)
    }

    /// Remove the entry for `package`, returning it if it was registered.
    pub fn remove_plugin(&self, package: &L::Package) -> Result<Option<PluginDescriptor>> {
        self.unregister_plugin(package.name())
    }

    /// Remove the entry for `key`. The file is left untouched when there is
    /// nothing to remove.
    pub fn unregister_plugin(&self, key: &str) -> Result<Option<PluginDescriptor>> {
        let mut plugins = self.store.load()?;

        let Some(descriptor) = plugins.remove(key) else {
            tracing::debug!("Plugin '{}' is not registered", key);
            return Ok(None);
        };

        self.store.save(&plugins)?;
        Ok(Some(descriptor))
    }

    /// All registered plugins.
    pub fn plugins(&self) -> Result<Registry> {
        self.store.load()
    }
}
