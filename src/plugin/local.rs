//! Standalone filesystem host: packages are plain directories with a
//! package.toml, installed by copying them under the install root.
//! Local installs copy files (no symlinks).

use anyhow::{Context, Result, bail};
use registrar_interface::{Author, LibraryInstaller, Package, PackageData};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::plugin::manifest::{MANIFEST_FILE, PackageManifest, validate_package_name};

/// A package read from a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalPackage {
    data: PackageData,
    source_dir: PathBuf,
}

impl LocalPackage {
    /// Load and validate the package.toml in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            bail!("Package directory does not exist: {:?}", dir);
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            bail!(
                "Package directory does not contain {}: {:?}",
                MANIFEST_FILE,
                dir
            );
        }

        let content = fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {:?}", manifest_path))?;
        let manifest: PackageManifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", manifest_path))?;
        if let Err(e) = manifest.validate() {
            bail!("Invalid package manifest {:?}: {}", manifest_path, e);
        }

        Ok(Self {
            data: manifest.into_package(),
            source_dir: dir.to_path_buf(),
        })
    }

    /// Directory the package files are copied from.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}

impl Package for LocalPackage {
    fn name(&self) -> &str {
        self.data.name()
    }

    fn pretty_name(&self) -> &str {
        self.data.pretty_name()
    }

    fn pretty_version(&self) -> &str {
        self.data.pretty_version()
    }

    fn package_type(&self) -> &str {
        self.data.package_type()
    }

    fn description(&self) -> Option<&str> {
        self.data.description()
    }

    fn authors(&self) -> &[Author] {
        self.data.authors()
    }

    fn extra(&self) -> &Map<String, Value> {
        self.data.extra()
    }

    fn min_interface_version(&self) -> Option<&str> {
        self.data.min_interface_version()
    }
}

/// Installs packages to `<install_root>/<pretty name>`.
#[derive(Debug, Clone)]
pub struct LocalLibraryInstaller {
    install_root: PathBuf,
}

impl LocalLibraryInstaller {
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
        }
    }

    /// Installed directory for a package name in `vendor/name` form.
    ///
    /// Fails for any name that would resolve outside the install root.
    pub fn package_dir(&self, pretty_name: &str) -> Result<PathBuf> {
        if let Err(e) = validate_package_name(pretty_name) {
            bail!(e);
        }

        let relative = Path::new(pretty_name);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !plain || relative.components().count() != 2 {
            bail!(
                "Package name '{}' does not stay under the install root",
                pretty_name
            );
        }

        Ok(self.install_root.join(relative))
    }

    fn place(&self, package: &LocalPackage) -> Result<()> {
        let target_dir = self.package_dir(package.pretty_name())?;
        copy_dir_recursive(package.source_dir(), &target_dir).with_context(|| {
            format!(
                "Failed to copy package files from {:?} to {:?}",
                package.source_dir(),
                target_dir
            )
        })
    }

    fn remove(&self, package: &LocalPackage) -> Result<()> {
        let target_dir = self.package_dir(package.pretty_name())?;
        if !target_dir.exists() {
            tracing::debug!("Nothing to remove at {:?}", target_dir);
            return Ok(());
        }
        fs::remove_dir_all(&target_dir)
            .with_context(|| format!("Failed to remove package directory: {:?}", target_dir))
    }
}

impl LibraryInstaller for LocalLibraryInstaller {
    type Package = LocalPackage;

    // Names are validated when a LocalPackage is loaded; file operations
    // re-check through package_dir.
    fn install_path(&self, package: &LocalPackage) -> PathBuf {
        self.install_root.join(package.pretty_name())
    }

    fn install(&mut self, package: &LocalPackage) -> Result<()> {
        let target_dir = self.package_dir(package.pretty_name())?;
        if target_dir.exists() {
            bail!(
                "Package '{}' is already installed at {:?}\n\
                 Use update to replace the existing installation.",
                package.pretty_name(),
                target_dir
            );
        }
        self.place(package)
    }

    fn update(&mut self, initial: &LocalPackage, target: &LocalPackage) -> Result<()> {
        self.remove(initial)?;
        self.place(target)
    }

    fn uninstall(&mut self, package: &LocalPackage) -> Result<()> {
        self.remove(package)
    }
}

/// Recursively copy a directory and all its contents.
pub fn copy_dir_recursive(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let source_path = entry.path();
        let target_path = target.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_recursive(&source_path, &target_path)?;
        } else if file_type.is_file() {
            fs::copy(&source_path, &target_path)?;
        }
        // Skip symlinks and other file types
    }

    Ok(())
}
