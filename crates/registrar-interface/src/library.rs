//! The file placement contract the registrar composes with.

use anyhow::Result;
use std::path::PathBuf;

use crate::package::Package;

/// Performs the filesystem side of installing a package.
///
/// The registrar calls these before touching the plugin registry. During an
/// update rollback `update` is called a second time with the arguments
/// swapped, so implementations must be able to restore `initial` from it.
pub trait LibraryInstaller {
    /// Package type this installer places on disk.
    type Package: Package;

    /// Directory the package is (or will be) installed into.
    fn install_path(&self, package: &Self::Package) -> PathBuf;

    fn install(&mut self, package: &Self::Package) -> Result<()>;

    fn update(&mut self, initial: &Self::Package, target: &Self::Package) -> Result<()>;

    fn uninstall(&mut self, package: &Self::Package) -> Result<()>;
}
