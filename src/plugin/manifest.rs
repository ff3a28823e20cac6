//! Package manifest parsing and validation.
//!
//! Defines the PackageManifest struct for parsing package.toml files.

use registrar_interface::{Author, PackageData};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Manifest file name inside a package directory.
pub const MANIFEST_FILE: &str = "package.toml";

/// Package manifest from a package.toml file.
///
/// Required fields: name, version
/// Optional fields have serde defaults for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name in `vendor/name` form
    pub name: String,

    /// Package version as published
    pub version: String,

    /// Package type (e.g. "cms-plugin")
    #[serde(rename = "type", default = "default_package_type")]
    pub package_type: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub authors: Vec<Author>,

    /// Free-form extra data; plugin overrides live here
    #[serde(default)]
    pub extra: Map<String, Value>,

    /// Minimum registrar interface version required by this package
    #[serde(default)]
    pub min_interface_version: Option<String>,
}

fn default_package_type() -> String {
    "library".to_string()
}

impl PackageManifest {
    /// Validate the manifest fields.
    ///
    /// Checks:
    /// - name passes [`validate_package_name`]
    /// - version is not empty
    /// - min_interface_version is valid semver if present
    pub fn validate(&self) -> Result<(), String> {
        validate_package_name(&self.name)?;

        if self.version.trim().is_empty() {
            return Err("Package version cannot be empty".to_string());
        }

        if let Some(ref min_ver) = self.min_interface_version
            && semver::Version::parse(min_ver).is_err()
        {
            return Err(format!("Invalid min_interface_version '{}'", min_ver));
        }

        Ok(())
    }

    /// Convert into host-neutral package metadata.
    pub fn into_package(self) -> PackageData {
        let mut package = PackageData::new(self.name, self.version)
            .with_type(self.package_type)
            .with_authors(self.authors)
            .with_extra(self.extra);
        if let Some(description) = self.description {
            package = package.with_description(description);
        }
        if let Some(min_ver) = self.min_interface_version {
            package = package.with_min_interface_version(min_ver);
        }
        package
    }
}

/// A package name is exactly `vendor/name`, each part a plain directory
/// name. Installed packages live at `<install root>/<vendor>/<name>`, so
/// anything else could point outside the install root.
pub fn validate_package_name(name: &str) -> Result<(), String> {
    let invalid = || {
        format!(
            "Invalid package name '{}': must be in vendor/name form",
            name
        )
    };

    let (vendor, package) = name.split_once('/').ok_or_else(invalid)?;
    for part in [vendor, package] {
        if part.is_empty()
            || part == "."
            || part == ".."
            || part.contains(['/', '\\', ':'])
        {
            return Err(invalid());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_interface::Package;
    use serde_json::json;

    #[test]
    fn test_parse_full_manifest() {
        let toml = r#"
name = "Acme/Widgets"
version = "1.2.0"
type = "cms-plugin"
description = "Widget pack"
min_interface_version = "0.1.0"

[[authors]]
name = "Jane"
email = "jane@example.com"

[[authors]]
name = "John"

[extra]
title = "Widgets"
branch-alias = { dev-main = "1.x-dev" }
"#;
        let manifest: PackageManifest = toml::from_str(toml).unwrap();
        assert!(manifest.validate().is_ok());
        assert_eq!(manifest.package_type, "cms-plugin");
        assert_eq!(manifest.authors.len(), 2);
        assert_eq!(manifest.authors[0].email.as_deref(), Some("jane@example.com"));
        assert_eq!(manifest.extra.get("title"), Some(&json!("Widgets")));
        assert_eq!(
            manifest.extra.get("branch-alias"),
            Some(&json!({ "dev-main": "1.x-dev" }))
        );

        let package = manifest.into_package();
        assert_eq!(package.name(), "acme/widgets");
        assert_eq!(package.pretty_name(), "Acme/Widgets");
        assert_eq!(package.description(), Some("Widget pack"));
        assert_eq!(package.min_interface_version(), Some("0.1.0"));
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let toml = r#"
name = "acme/widgets"
version = "0.1.0"
"#;
        let manifest: PackageManifest = toml::from_str(toml).unwrap();
        assert!(manifest.validate().is_ok());
        assert_eq!(manifest.package_type, "library");
        assert!(manifest.description.is_none());
        assert!(manifest.authors.is_empty());
        assert!(manifest.extra.is_empty());
    }

    #[test]
    fn test_parse_with_unknown_fields() {
        let toml = r#"
name = "acme/widgets"
version = "1.0.0"
license = "MIT"
keywords = ["a", "b"]
"#;
        let manifest: PackageManifest = toml::from_str(toml).unwrap();
        assert!(manifest.validate().is_ok());
    }

    fn manifest(name: &str, version: &str) -> PackageManifest {
        PackageManifest {
            name: name.to_string(),
            version: version.to_string(),
            package_type: default_package_type(),
            description: None,
            authors: Vec::new(),
            extra: Map::new(),
            min_interface_version: None,
        }
    }

    #[test]
    fn test_validate_name_form() {
        assert!(manifest("widgets", "1.0.0").validate().is_err());
        assert!(manifest("/widgets", "1.0.0").validate().is_err());
        assert!(manifest("acme/", "1.0.0").validate().is_err());
        assert!(manifest("acme/widgets/extra", "1.0.0").validate().is_err());
        assert!(manifest("acme/widgets", "1.0.0").validate().is_ok());
    }

    #[test]
    fn test_validate_name_stays_under_install_root() {
        for name in [
            "../escaped",
            "acme/..",
            "./widgets",
            "acme/.",
            "acme\\..\\x/widgets",
            "C:/widgets",
        ] {
            let err = manifest(name, "1.0.0").validate().unwrap_err();
            assert!(err.contains("vendor/name"), "{name}: {err}");
        }

        assert!(validate_package_name("acme/widgets.v2").is_ok());
        assert!(validate_package_name("acme/..widgets").is_ok());
    }

    #[test]
    fn test_validate_empty_version() {
        let result = manifest("acme/widgets", " ").validate();
        assert!(result.unwrap_err().contains("version cannot be empty"));
    }

    #[test]
    fn test_validate_non_semver_version_allowed() {
        assert!(manifest("acme/widgets", "dev-main").validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_min_interface_version() {
        let mut m = manifest("acme/widgets", "1.0.0");
        m.min_interface_version = Some("bad-version".to_string());
        assert!(m.validate().unwrap_err().contains("Invalid min_interface_version"));
    }
}
