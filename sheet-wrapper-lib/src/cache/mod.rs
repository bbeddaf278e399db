//! Snapshot caching
//!
//! Reading a whole sheet is the most expensive host call, so the wrapper keeps
//! the last snapshot per sheet in a [`CacheProvider`] until it expires or the
//! wrapper writes to the sheet. Invalidation is explicit: anything that
//! changes the sheet must call [`CacheProvider::invalidate`].

mod config;
mod memory;
mod snapshot;

pub use config::*;
pub use memory::*;
pub use snapshot::*;

use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;

use crate::model::Table;

/// A cached table snapshot with metadata about when it was cached and when it expires.
#[derive(Debug, Clone)]
pub struct CachedTable {
    /// The snapshot itself, shared with every reader.
    pub table: Arc<Table>,
    /// When this snapshot was cached.
    pub created_at: DateTime<Utc>,
    /// When this snapshot expires and should no longer be returned.
    pub expires_at: DateTime<Utc>,
}

impl CachedTable {
    /// Creates a cached snapshot with a TTL from now.
    ///
    /// A TTL reaching past the largest representable timestamp is clamped to
    /// it, so `Duration::MAX` caches until invalidated.
    pub fn with_ttl(table: Arc<Table>, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            table,
            created_at: now,
            expires_at,
        }
    }

    /// Returns `true` if this snapshot has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Storage for sheet snapshots, keyed by sheet.
///
/// Providers must never return expired snapshots from `get()`. They are
/// `Send + Sync` so one cache can back several wrappers over the same
/// spreadsheet.
pub trait CacheProvider: Send + Sync {
    /// Returns the snapshot cached under `key`, if present and fresh.
    fn get(&self, key: &str) -> Option<CachedTable>;

    /// Stores a snapshot.
    fn set(&self, key: &str, value: CachedTable);

    /// Drops the snapshot cached under `key`.
    fn invalidate(&self, key: &str);

    /// Drops every snapshot.
    fn clear(&self);

    /// Removes all expired entries and returns how many were removed.
    fn gc(&self) -> usize;
}
