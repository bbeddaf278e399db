//! Table snapshot with cache status

use std::ops::Deref;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use super::CachedTable;
use crate::model::Table;

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Caching is disabled; the sheet was read directly.
    Bypassed,
    /// The sheet was read and the result is now cached.
    Miss {
        /// When the snapshot was cached.
        cached_at: DateTime<Utc>,
        /// When the cached snapshot will expire.
        expires_at: DateTime<Utc>,
    },
    /// The snapshot was served from the cache.
    Hit {
        /// When the snapshot was originally cached.
        cached_at: DateTime<Utc>,
        /// When the cached snapshot will expire.
        expires_at: DateTime<Utc>,
    },
}

impl CacheStatus {
    /// Returns `true` if this is a cache hit.
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Returns `true` if this is a cache miss.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }
}

/// The values of a sheet at one point in time.
///
/// Derefs to the underlying [`Table`].
#[derive(Debug, Clone)]
pub struct Snapshot {
    table: Arc<Table>,
    /// Whether this snapshot came from the cache.
    pub cache: CacheStatus,
}

impl Snapshot {
    /// Wraps a table read with caching disabled.
    pub fn bypassed(table: Table) -> Self {
        Self {
            table: Arc::new(table),
            cache: CacheStatus::Bypassed,
        }
    }

    /// Wraps a freshly read table that was just cached.
    pub fn miss(cached: &CachedTable) -> Self {
        Self {
            table: Arc::clone(&cached.table),
            cache: CacheStatus::Miss {
                cached_at: cached.created_at,
                expires_at: cached.expires_at,
            },
        }
    }

    /// Wraps a table served from the cache.
    pub fn hit(cached: CachedTable) -> Self {
        Self {
            cache: CacheStatus::Hit {
                cached_at: cached.created_at,
                expires_at: cached.expires_at,
            },
            table: cached.table,
        }
    }

    /// Returns `true` if this snapshot came from the cache.
    pub fn is_cached(&self) -> bool {
        self.cache.is_hit()
    }

    /// Returns the shared table.
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }
}

impl Deref for Snapshot {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.table
    }
}
