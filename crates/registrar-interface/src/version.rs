//! Interface version protocol.
//!
//! Plugin packages may declare the minimum registrar interface they were
//! written against. The registrar refuses to register packages that need a
//! newer interface than the one it provides.

use semver::Version;

/// Current interface crate version.
pub const INTERFACE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if a package's minimum interface version is satisfied by the host.
///
/// # Compatibility rules
///
/// - Same major version required (breaking changes only in major versions)
/// - Host version must be >= the package's minimum version
///
/// # Returns
///
/// * `Ok(true)` - Versions are compatible
/// * `Ok(false)` - Versions are incompatible
/// * `Err(msg)` - Version string parsing failed
///
/// # Example
///
/// ```
/// use registrar_interface::is_version_compatible;
///
/// assert!(is_version_compatible("0.1.0", "0.1.0").unwrap());
/// assert!(is_version_compatible("0.1.0", "0.2.0").unwrap());
/// assert!(!is_version_compatible("0.2.0", "0.1.0").unwrap());
/// assert!(!is_version_compatible("1.0.0", "0.9.0").unwrap());
/// ```
pub fn is_version_compatible(min_version: &str, host_version: &str) -> Result<bool, String> {
    let min = Version::parse(min_version)
        .map_err(|e| format!("Invalid interface version '{}': {}", min_version, e))?;
    let host = Version::parse(host_version)
        .map_err(|e| format!("Invalid host version '{}': {}", host_version, e))?;

    Ok(host.major == min.major && host >= min)
}
