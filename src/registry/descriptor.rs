use serde::{Deserialize, Serialize};

/// Registry record for one installed plugin package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Plugin identifier (e.g. `acme.widgets`)
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Installed version as the package author wrote it
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Schema file relative to the package directory, when the package ships one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}
