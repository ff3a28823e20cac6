//! Descriptor overrides from a package's `extra` block.

use serde_json::{Map, Value};

/// Recognised overrides. Any other key in `extra` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginExtra {
    pub name: Option<String>,
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

impl PluginExtra {
    /// Pick the override keys out of a raw `extra` map.
    ///
    /// `null` counts as absent. Any other non-string value for a recognised
    /// key is an error.
    pub fn from_map(extra: &Map<String, Value>) -> Result<Self, String> {
        Ok(Self {
            name: string_field(extra, "name")?,
            title: string_field(extra, "title")?,
            version: string_field(extra, "version")?,
            description: string_field(extra, "description")?,
            author: string_field(extra, "author")?,
        })
    }
}

fn string_field(extra: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match extra.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!(
            "extra.{} must be a string, found {}",
            key,
            value_kind(other)
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
