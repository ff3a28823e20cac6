pub mod builder;
pub mod error;
pub mod extra;
pub mod installer;
pub mod local;
pub mod manifest;

pub use builder::{DefaultPolicy, DescriptorBuilder, DescriptorPolicy, SCHEMA_FILE};
pub use error::InvalidPluginError;
pub use extra::PluginExtra;
pub use installer::{DEFAULT_PLUGIN_TYPE, PluginInstaller};
pub use local::{LocalLibraryInstaller, LocalPackage};
pub use manifest::{MANIFEST_FILE, PackageManifest};
