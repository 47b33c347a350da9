//! Cache Store Module
//!
//! Key-value storage with per-entry TTL. The store itself is not
//! synchronized; [`crate::Cache`] wraps it in a reader-writer lock.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::entry::current_timestamp_nanos;
use crate::cache::{CacheEntry, Expiration};

// == Cache Store ==
/// Map from key to entry plus the default TTL applied by `set`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// TTL used for `Expiration::Default`, zero = never expire
    default_ttl: Duration,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
        }
    }

    /// Returns the TTL applied to `Expiration::Default` writes.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores a value, replacing any existing entry for `key` wholesale.
    pub fn set(&mut self, key: String, value: V, ttl: Expiration) {
        let entry = CacheEntry::new(value, ttl.resolve(self.default_ttl));
        self.entries.insert(key, entry);
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Delete Expired ==
    /// Removes every entry whose expiration is strictly in the past.
    ///
    /// Returns the number of entries removed.
    pub fn delete_expired(&mut self) -> usize {
        self.delete_expired_at(current_timestamp_nanos())
    }

    /// Removes every entry expired as of `now` (Unix nanoseconds).
    pub fn delete_expired_at(&mut self, now: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn insert_entry(&mut self, key: &str, entry: CacheEntry<V>) {
        self.entries.insert(key.to_string(), entry);
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Returns the value for `key` if present and not expired.
    ///
    /// Expired entries are reported as absent but stay in the map until a
    /// sweep or an explicit delete removes them.
    pub fn get(&self, key: &str) -> Option<V> {
        self.live_entry(key).map(|entry| entry.value.clone())
    }

    /// Like [`get`](Self::get), also returning the remaining TTL
    /// (`None` for entries that never expire).
    pub fn get_with_expiration(&self, key: &str) -> Option<(V, Option<Duration>)> {
        self.live_entry(key)
            .map(|entry| (entry.value.clone(), entry.ttl_remaining()))
    }

    fn live_entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key).filter(|entry| !entry.is_expired())
    }
}
