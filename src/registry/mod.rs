//! The generated plugin registry file.
//!
//! One JSON document maps every installed plugin package to its descriptor.
//! It is regenerated wholesale on every install, update and uninstall.

pub mod cache;
pub mod descriptor;
pub mod portable;
pub mod store;

pub use cache::{CacheInvalidator, NoopInvalidator};
pub use descriptor::PluginDescriptor;
pub use portable::PortableValue;
pub use store::{Registry, RegistryStore, REGISTRY_FILE};
