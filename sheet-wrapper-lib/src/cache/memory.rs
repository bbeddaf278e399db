//! In-memory cache implementation using DashMap

use dashmap::DashMap;

use super::CacheProvider;
use super::CachedTable;

/// An in-memory snapshot cache backed by a concurrent hash map.
///
/// This is the default cache. Snapshots live for the lifetime of the process
/// or until they expire or are invalidated.
///
/// # Example
///
/// ```
/// use sheet_wrapper_lib::cache::InMemoryCache;
///
/// let cache = InMemoryCache::new();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCache {
    store: DashMap<String, CachedTable>,
}

impl InMemoryCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl CacheProvider for InMemoryCache {
    fn get(&self, key: &str) -> Option<CachedTable> {
        let entry = self.store.get(key)?;

        if entry.value().is_expired() {
            drop(entry);
            self.store.remove(key);
            log::trace!("snapshot cache: expired entry for {}", key);
            None
        } else {
            Some(entry.value().clone())
        }
    }

    fn set(&self, key: &str, value: CachedTable) {
        self.store.insert(key.to_string(), value);
    }

    fn invalidate(&self, key: &str) {
        if self.store.remove(key).is_some() {
            log::trace!("snapshot cache: invalidated {}", key);
        }
    }

    fn clear(&self) {
        self.store.clear();
    }

    fn gc(&self) -> usize {
        let mut removed = 0;
        self.store.retain(|_, value| {
            if value.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }
}
