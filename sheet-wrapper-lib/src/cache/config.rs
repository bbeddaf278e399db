//! Cache configuration

use std::time::Duration;

/// Configuration for snapshot caching.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sheet_wrapper_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default().with_snapshot_ttl(Duration::from_secs(30));
/// assert!(config.is_enabled());
/// assert!(!CacheConfig::no_cache().is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a sheet snapshot may be served without re-reading the sheet.
    ///
    /// Default: 5 minutes
    pub snapshot_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            snapshot_ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the snapshot TTL.
    pub fn with_snapshot_ttl(mut self, ttl: Duration) -> Self {
        self.snapshot_ttl = ttl;
        self
    }

    /// Creates a config that always reads from the sheet.
    pub fn no_cache() -> Self {
        Self {
            snapshot_ttl: Duration::ZERO,
        }
    }

    /// Returns `true` if snapshots are cached at all.
    pub fn is_enabled(&self) -> bool {
        !self.snapshot_ttl.is_zero()
    }
}
