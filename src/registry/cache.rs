use std::path::Path;

/// Invalidates a process-level compiled cache for a registry file.
///
/// Called before every load and after every save so a host that caches the
/// parsed registry within its own process picks up the regenerated file.
pub trait CacheInvalidator {
    fn invalidate(&self, path: &Path);
}

/// Used on hosts without such a cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn invalidate(&self, _path: &Path) {}
}
