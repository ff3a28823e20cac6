//! Contracts between the plugin registrar and the package manager hosting it.
//!
//! The host supplies package metadata through [`Package`] and performs the
//! actual file placement through a [`LibraryInstaller`]. The registrar only
//! ever talks to the host through these traits.

pub mod library;
pub mod package;
pub mod version;

pub use library::LibraryInstaller;
pub use package::{Author, Package, PackageData};
pub use version::{is_version_compatible, INTERFACE_VERSION};
