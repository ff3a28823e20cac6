//! Derives a plugin descriptor from package metadata.
//!
//! Every field comes from the package's `extra` override when one is set,
//! otherwise from the package metadata itself:
//! - name: pretty name with `/` replaced by `.`
//! - title: pretty name
//! - version: pretty version
//! - description: package description, if non-empty
//! - author: first author's name, if non-empty
//! - schema: `schema.xml` when the file exists in the install path

use registrar_interface::{is_version_compatible, Author, Package, INTERFACE_VERSION};
use std::path::Path;

use crate::plugin::error::InvalidPluginError;
use crate::plugin::extra::PluginExtra;
use crate::registry::PluginDescriptor;

/// Schema file looked up in the package's install path.
pub const SCHEMA_FILE: &str = "schema.xml";

/// Decides whether a built descriptor is acceptable.
///
/// Hosts can supply their own policy to tighten what counts as a plugin.
pub trait DescriptorPolicy {
    fn validate(
        &self,
        package: &dyn Package,
        descriptor: &PluginDescriptor,
    ) -> Result<(), InvalidPluginError>;
}

/// Rejects empty identifying fields and packages that need a newer
/// registrar interface.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPolicy;

impl DescriptorPolicy for DefaultPolicy {
    fn validate(
        &self,
        package: &dyn Package,
        descriptor: &PluginDescriptor,
    ) -> Result<(), InvalidPluginError> {
        let invalid = |reason: String| InvalidPluginError::new(package.name(), reason);

        if descriptor.name.trim().is_empty() {
            return Err(invalid("plugin name cannot be empty".to_string()));
        }
        if descriptor.title.trim().is_empty() {
            return Err(invalid("plugin title cannot be empty".to_string()));
        }
        if descriptor.version.trim().is_empty() {
            return Err(invalid("plugin version cannot be empty".to_string()));
        }

        if let Some(min_ver) = package.min_interface_version() {
            match is_version_compatible(min_ver, INTERFACE_VERSION) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(invalid(format!(
                        "requires registrar interface {}, but host provides {}",
                        min_ver, INTERFACE_VERSION
                    )));
                }
                Err(e) => return Err(invalid(e)),
            }
        }

        Ok(())
    }
}

/// Builds descriptors and runs them through a [`DescriptorPolicy`].
pub struct DescriptorBuilder {
    policy: Box<dyn DescriptorPolicy>,
}

impl Default for DescriptorBuilder {
    fn default() -> Self {
        Self::new(Box::new(DefaultPolicy))
    }
}

impl DescriptorBuilder {
    pub fn new(policy: Box<dyn DescriptorPolicy>) -> Self {
        Self { policy }
    }

    /// Build the descriptor for `package`, installed at `install_path`.
    pub fn build(
        &self,
        package: &dyn Package,
        install_path: &Path,
    ) -> Result<PluginDescriptor, InvalidPluginError> {
        let extra = PluginExtra::from_map(package.extra())
            .map_err(|reason| InvalidPluginError::new(package.name(), reason))?;
        let pretty_name = package.pretty_name();

        let descriptor = PluginDescriptor {
            name: extra
                .name
                .unwrap_or_else(|| pretty_name.replace('/', ".")),
            title: extra.title.unwrap_or_else(|| pretty_name.to_string()),
            version: extra
                .version
                .unwrap_or_else(|| package.pretty_version().to_string()),
            description: extra
                .description
                .or_else(|| non_empty(package.description())),
            author: extra.author.or_else(|| first_author_name(package.authors())),
            schema: install_path
                .join(SCHEMA_FILE)
                .is_file()
                .then(|| SCHEMA_FILE.to_string()),
        };

        self.policy.validate(package, &descriptor)?;
        Ok(descriptor)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

fn first_author_name(authors: &[Author]) -> Option<String> {
    authors
        .first()
        .and_then(|author| non_empty(author.name.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use registrar_interface::PackageData;
    use serde_json::{json, Map, Value};
    use std::fs;
    use tempfile::TempDir;

    fn extra(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn build(package: &PackageData) -> Result<PluginDescriptor, InvalidPluginError> {
        let temp_dir = TempDir::new().unwrap();
        DescriptorBuilder::default().build(package, temp_dir.path())
    }

    #[test]
    fn test_defaults_from_package() {
        let package = PackageData::new("acme/widgets", "1.2.0");
        let descriptor = build(&package).unwrap();

        assert_eq!(
            descriptor,
            PluginDescriptor {
                name: "acme.widgets".to_string(),
                title: "acme/widgets".to_string(),
                version: "1.2.0".to_string(),
                description: None,
                author: None,
                schema: None,
            }
        );
    }

    #[test]
    fn test_defaults_use_pretty_name() {
        let package = PackageData::new("Acme/Widgets", "v1.0");
        let descriptor = build(&package).unwrap();
        assert_eq!(descriptor.name, "Acme.Widgets");
        assert_eq!(descriptor.title, "Acme/Widgets");
        assert_eq!(descriptor.version, "v1.0");
    }

    #[test]
    fn test_description_and_first_author() {
        let package = PackageData::new("acme/widgets", "1.0.0")
            .with_description("Widget pack")
            .with_authors(vec![Author::named("Jane"), Author::named("John")]);
        let descriptor = build(&package).unwrap();

        assert_eq!(descriptor.description.as_deref(), Some("Widget pack"));
        assert_eq!(descriptor.author.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_empty_description_and_nameless_author_skipped() {
        let package = PackageData::new("acme/widgets", "1.0.0")
            .with_description("")
            .with_authors(vec![Author::default(), Author::named("John")]);
        let descriptor = build(&package).unwrap();

        assert!(descriptor.description.is_none());
        // Only the first author is considered
        assert!(descriptor.author.is_none());
    }

    #[test]
    fn test_each_override_wins_independently() {
        let base = PackageData::new("acme/widgets", "1.0.0")
            .with_description("Computed")
            .with_authors(vec![Author::named("Computed Author")]);
        let computed = build(&base).unwrap();

        let cases = [
            ("name", "custom.id"),
            ("title", "Custom Title"),
            ("version", "9.9.9"),
            ("description", "Custom description"),
            ("author", "Jane"),
        ];

        for (key, value) in cases {
            let package = base.clone().with_extra(extra(json!({ key: value })));
            let descriptor = build(&package).unwrap();

            let mut expected = computed.clone();
            match key {
                "name" => expected.name = value.to_string(),
                "title" => expected.title = value.to_string(),
                "version" => expected.version = value.to_string(),
                "description" => expected.description = Some(value.to_string()),
                "author" => expected.author = Some(value.to_string()),
                _ => unreachable!(),
            }
            assert_eq!(descriptor, expected, "override of '{}'", key);
        }
    }

    #[test]
    fn test_override_author_ignores_author_list() {
        let package = PackageData::new("acme/widgets", "1.0.0")
            .with_authors(vec![Author::named("Someone Else")])
            .with_extra(extra(json!({ "name": "custom.id", "author": "Jane" })));
        let descriptor = build(&package).unwrap();

        assert_eq!(descriptor.name, "custom.id");
        assert_eq!(descriptor.author.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_schema_detected_in_install_path() {
        let temp_dir = TempDir::new().unwrap();
        let package = PackageData::new("acme/widgets", "1.0.0");
        let builder = DescriptorBuilder::default();

        assert!(builder.build(&package, temp_dir.path()).unwrap().schema.is_none());

        fs::write(temp_dir.path().join(SCHEMA_FILE), "<schema/>").unwrap();
        assert_eq!(
            builder.build(&package, temp_dir.path()).unwrap().schema.as_deref(),
            Some("schema.xml")
        );
    }

    #[test]
    fn test_schema_directory_is_not_a_schema() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(SCHEMA_FILE)).unwrap();
        let package = PackageData::new("acme/widgets", "1.0.0");

        let descriptor = DescriptorBuilder::default()
            .build(&package, temp_dir.path())
            .unwrap();
        assert!(descriptor.schema.is_none());
    }

    #[test]
    fn test_default_derivation_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(SCHEMA_FILE), "<schema/>").unwrap();
        let package = PackageData::new("acme/widgets", "1.2.0")
            .with_description("Widget pack")
            .with_authors(vec![Author::named("Jane")]);
        let builder = DescriptorBuilder::default();

        let first = builder.build(&package, temp_dir.path()).unwrap();
        let second = builder.build(&package, temp_dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_string_override_is_invalid() {
        let package = PackageData::new("acme/widgets", "1.0.0")
            .with_extra(extra(json!({ "title": { "en": "Widgets" } })));
        let err = build(&package).unwrap_err();

        assert_eq!(err.package, "acme/widgets");
        assert!(err.reason.contains("extra.title"));
    }

    #[test]
    fn test_empty_name_override_is_invalid() {
        let package =
            PackageData::new("acme/widgets", "1.0.0").with_extra(extra(json!({ "name": "" })));
        let err = build(&package).unwrap_err();
        assert!(err.reason.contains("name cannot be empty"));
    }

    #[test]
    fn test_empty_version_is_invalid() {
        let package = PackageData::new("acme/widgets", "");
        let err = build(&package).unwrap_err();
        assert!(err.reason.contains("version cannot be empty"));
    }

    #[test]
    fn test_interface_version_policy() {
        let compatible =
            PackageData::new("acme/widgets", "1.0.0").with_min_interface_version(INTERFACE_VERSION);
        assert!(build(&compatible).is_ok());

        let too_new = PackageData::new("acme/widgets", "1.0.0").with_min_interface_version("99.0.0");
        let err = build(&too_new).unwrap_err();
        assert!(err.reason.contains("requires registrar interface 99.0.0"));

        let garbage = PackageData::new("acme/widgets", "1.0.0").with_min_interface_version("latest");
        assert!(build(&garbage).is_err());
    }

    #[test]
    fn test_custom_policy() {
        struct RequireAuthor;

        impl DescriptorPolicy for RequireAuthor {
            fn validate(
                &self,
                package: &dyn Package,
                descriptor: &PluginDescriptor,
            ) -> Result<(), InvalidPluginError> {
                match descriptor.author {
                    Some(_) => Ok(()),
                    None => Err(InvalidPluginError::new(package.name(), "author required")),
                }
            }
        }

        let temp_dir = TempDir::new().unwrap();
        let builder = DescriptorBuilder::new(Box::new(RequireAuthor));

        let anonymous = PackageData::new("acme/widgets", "1.0.0");
        assert!(builder.build(&anonymous, temp_dir.path()).is_err());

        let signed = anonymous.with_authors(vec![Author::named("Jane")]);
        assert!(builder.build(&signed, temp_dir.path()).is_ok());
    }
}
