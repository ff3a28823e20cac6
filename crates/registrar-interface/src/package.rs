//! Package metadata as seen by the registrar.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a package's author list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub homepage: Option<String>,

    #[serde(default)]
    pub role: Option<String>,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Metadata source for a single package.
///
/// `name()` is the stable identity used as the registry key. Hosts usually
/// return the lowercased form of `pretty_name()` here.
pub trait Package {
    /// Stable package identity (e.g. `acme/widgets`).
    fn name(&self) -> &str;

    /// Display name as written by the package author (e.g. `Acme/Widgets`).
    fn pretty_name(&self) -> &str;

    /// Resolved version string as written by the package author.
    fn pretty_version(&self) -> &str;

    /// Package type the host dispatches installers on.
    fn package_type(&self) -> &str;

    /// Long description, if the package has one.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Author list in manifest order.
    fn authors(&self) -> &[Author] {
        &[]
    }

    /// Free-form `extra` block of the manifest.
    fn extra(&self) -> &Map<String, Value>;

    /// Minimum registrar interface version the package declares, if any.
    fn min_interface_version(&self) -> Option<&str> {
        None
    }
}

/// Plain in-memory package, for hosts that already hold parsed metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageData {
    name: String,
    pretty_name: String,
    pretty_version: String,
    package_type: String,
    description: Option<String>,
    authors: Vec<Author>,
    extra: Map<String, Value>,
    min_interface_version: Option<String>,
}

impl PackageData {
    /// Create a package with the given display name and version.
    ///
    /// The identity is the lowercased display name. The type defaults to
    /// `library`.
    pub fn new(pretty_name: impl Into<String>, pretty_version: impl Into<String>) -> Self {
        let pretty_name = pretty_name.into();
        Self {
            name: pretty_name.to_lowercase(),
            pretty_name,
            pretty_version: pretty_version.into(),
            package_type: "library".to_string(),
            description: None,
            authors: Vec::new(),
            extra: Map::new(),
            min_interface_version: None,
        }
    }

    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = package_type.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_min_interface_version(mut self, version: impl Into<String>) -> Self {
        self.min_interface_version = Some(version.into());
        self
    }
}

impl Package for PackageData {
    fn name(&self) -> &str {
        &self.name
    }

    fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    fn pretty_version(&self) -> &str {
        &self.pretty_version
    }

    fn package_type(&self) -> &str {
        &self.package_type
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn authors(&self) -> &[Author] {
        &self.authors
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    fn min_interface_version(&self) -> Option<&str> {
        self.min_interface_version.as_deref()
    }
}
