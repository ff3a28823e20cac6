use std::fmt;

/// A package could not be turned into a plugin descriptor.
///
/// This is the only failure that makes an install or update roll back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPluginError {
    /// Identity of the offending package.
    pub package: String,
    /// Human-readable reason.
    pub reason: String,
}

impl InvalidPluginError {
    pub fn new(package: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InvalidPluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid plugin '{}': {}", self.package, self.reason)
    }
}

impl std::error::Error for InvalidPluginError {}
