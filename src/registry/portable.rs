//! Install-root relative values in the registry file.
//!
//! Any string that points at or below the install root is written as an
//! explicit `{"$install-root": "<suffix>"}` token instead of an absolute
//! path. Loading expands the token against whatever install root the file
//! is read from, so a copied or moved install tree keeps a valid registry.
//! Only whole path prefixes are matched; other strings are never rewritten.
//! The token keeps everything after the root verbatim, separator included,
//! so expanding it reproduces the saved string exactly.

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::path::Path;

/// Object key marking an install-root relative value.
pub const INSTALL_ROOT_TOKEN: &str = "$install-root";

/// A registry string value as it appears on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortableValue {
    /// Stored verbatim.
    Literal(String),
    /// Remainder after the install root, starting with `/`. Empty for the
    /// root itself.
    InstallRoot(String),
}

impl PortableValue {
    /// Classify `value` against a normalized install root.
    pub fn from_string(value: String, root: &str) -> Self {
        if root.is_empty() {
            return Self::Literal(value);
        }

        let candidate = normalize_separators(&value);
        match candidate.strip_prefix(root) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                Self::InstallRoot(rest.to_string())
            }
            _ => Self::Literal(value),
        }
    }

    /// Parse a stored JSON value. Returns `None` for anything that is neither
    /// a string nor an install-root token.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Literal(s.clone())),
            Value::Object(map) if map.len() == 1 => match map.get(INSTALL_ROOT_TOKEN) {
                Some(Value::String(suffix)) if suffix.is_empty() || suffix.starts_with('/') => {
                    Some(Self::InstallRoot(suffix.clone()))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Expand to a plain string under the given normalized install root.
    pub fn resolve(&self, root: &str) -> String {
        match self {
            Self::Literal(s) => s.clone(),
            Self::InstallRoot(suffix) => format!("{}{}", root, suffix),
        }
    }
}

impl From<PortableValue> for Value {
    fn from(value: PortableValue) -> Self {
        match value {
            PortableValue::Literal(s) => Value::String(s),
            PortableValue::InstallRoot(suffix) => {
                let mut map = Map::new();
                map.insert(INSTALL_ROOT_TOKEN.to_string(), Value::String(suffix));
                Value::Object(map)
            }
        }
    }
}

/// `\\` is only a separator on Windows; elsewhere it is part of a file name.
fn normalize_separators(value: &str) -> Cow<'_, str> {
    if cfg!(windows) {
        Cow::Owned(value.replace('\\', "/"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Forward slashes, no trailing separator.
pub fn normalize_root(root: &Path) -> String {
    let root = root.to_string_lossy();
    normalize_separators(&root).trim_end_matches('/').to_string()
}

/// Replace every string under `root` with an install-root token.
pub fn portabilize(value: Value, root: &str) -> Value {
    match value {
        Value::String(s) => PortableValue::from_string(s, root).into(),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| portabilize(v, root)).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, portabilize(v, root)))
                .collect(),
        ),
        other => other,
    }
}

/// Replace every install-root token with the absolute path under `root`.
pub fn expand(value: Value, root: &str) -> Value {
    if let Some(token @ PortableValue::InstallRoot(_)) = PortableValue::from_json(&value) {
        return Value::String(token.resolve(root));
    }

    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(|v| expand(v, root)).collect()),
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, expand(v, root))).collect())
        }
        other => other,
    }
}
