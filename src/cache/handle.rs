//! Cache Handle
//!
//! Public facade composing the store, its lock, the statistics counters and
//! the background expiration sweeper.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, Expiration, StatsRecorder};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::Sweeper;

// == Cache ==
/// Thread-safe TTL cache with a background expiration sweep.
///
/// All operations except [`stop_gc`](Self::stop_gc) are synchronous and run
/// on the caller's thread under a single reader-writer lock: reads share it,
/// writes and sweeps take it exclusively. Share a cache between threads by
/// wrapping it in an `Arc`.
///
/// Expired entries read as absent immediately, but are only physically
/// removed by a sweep or an explicit [`delete`](Self::delete).
pub struct Cache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    stats: Arc<StatsRecorder>,
    sweeper: Sweeper,
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and starts its expiration sweeper.
    ///
    /// # Arguments
    /// * `default_expiration` - TTL for `Expiration::Default` writes, zero = never expire
    /// * `gc_interval` - Interval between background sweeps
    ///
    /// # Errors
    /// Fails if `gc_interval` is zero or no Tokio runtime is running.
    pub fn new(default_expiration: Duration, gc_interval: Duration) -> Result<Self> {
        let store = Arc::new(RwLock::new(CacheStore::new(default_expiration)));
        let stats = Arc::new(StatsRecorder::new());
        let sweeper = Sweeper::spawn(store.clone(), stats.clone(), gc_interval)?;

        Ok(Self {
            store,
            stats,
            sweeper,
        })
    }

    /// Creates a cache from a [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.default_ttl, config.gc_interval)
    }

    // == Set ==
    /// Stores a value, replacing any existing entry for the key.
    ///
    /// `ttl` accepts a [`Duration`], [`Expiration::Never`] or
    /// [`Expiration::Default`].
    pub fn set(&self, key: impl Into<String>, value: V, ttl: impl Into<Expiration>) {
        self.store.write().set(key.into(), value, ttl.into());
    }

    // == Get ==
    /// Returns the value for `key`, or `None` if absent or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let value = self.store.read().get(key);
        self.record_read(value.is_some());
        value
    }

    /// Returns the value and its remaining TTL (`None` = never expires).
    pub fn get_with_expiration(&self, key: &str) -> Option<(V, Option<Duration>)> {
        let found = self.store.read().get_with_expiration(key);
        self.record_read(found.is_some());
        found
    }

    fn record_read(&self, hit: bool) {
        if hit {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.store.write().delete(key)
    }

    // == Delete Expired ==
    /// Removes all expired entries in one batch and returns how many.
    pub fn delete_expired(&self) -> usize {
        let removed = self.store.write().delete_expired();
        self.stats.record_expired(removed);
        debug!(removed, "Manual expiration sweep");
        removed
    }

    // == Stop GC ==
    /// Stops the background sweeper and waits for it to exit.
    ///
    /// Calling this more than once is harmless. The cache stays usable;
    /// expired entries are then only removed by
    /// [`delete_expired`](Self::delete_expired) or [`delete`](Self::delete).
    pub async fn stop_gc(&self) {
        self.sweeper.stop().await;
    }

    /// Returns true while the background sweeper is active.
    pub fn is_gc_running(&self) -> bool {
        self.sweeper.is_running()
    }

    /// Returns the interval between background sweeps.
    pub fn gc_interval(&self) -> Duration {
        self.sweeper.interval()
    }

    /// Returns the TTL applied to `Expiration::Default` writes.
    pub fn default_ttl(&self) -> Duration {
        self.store.read().default_ttl()
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("entries", &self.store.read().len())
            .field("sweeper", &self.sweeper)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    use crate::error::CacheError;

    fn test_cache() -> Cache<String> {
        Cache::new(Duration::from_secs(300), Duration::from_secs(60)).unwrap()
    }

    #[tokio::test]
    async fn test_cache_set_and_get() {
        let cache = test_cache();

        cache.set("key1", "value1".to_string(), Expiration::Default);

        assert_eq!(cache.get("key1").as_deref(), Some("value1"));
        assert!(cache.get("missing").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_accepts_duration_ttl() {
        let cache = test_cache();

        cache.set("short", "v".to_string(), Duration::from_millis(30));
        assert!(cache.get("short").is_some());

        sleep(Duration::from_millis(60));

        assert!(cache.get("short").is_none());
        assert_eq!(cache.len(), 1, "lazy expiry leaves the entry in place");
    }

    #[tokio::test]
    async fn test_cache_delete() {
        let cache = test_cache();
        cache.set("key", "value".to_string(), Expiration::Never);

        assert!(cache.delete("key"));
        assert!(!cache.delete("key"));
        assert!(cache.get("key").is_none());
    }

    #[tokio::test]
    async fn test_cache_delete_expired_counts() {
        let cache = test_cache();
        cache.set("a", "1".to_string(), Duration::from_millis(10));
        cache.set("b", "2".to_string(), Duration::from_millis(10));
        cache.set("c", "3".to_string(), Expiration::Never);

        sleep(Duration::from_millis(30));

        assert_eq!(cache.delete_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().expired_removed, 2);
    }

    #[tokio::test]
    async fn test_cache_stats_track_reads() {
        let cache = test_cache();
        cache.set("key", "value".to_string(), Expiration::Default);

        cache.get("key");
        cache.get("key");
        cache.get("missing");
        cache.get_with_expiration("key");

        let stats = cache.stats();
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[tokio::test]
    async fn test_cache_get_with_expiration() {
        let cache = test_cache();
        cache.set("ttl", "a".to_string(), Duration::from_secs(10));
        cache.set("forever", "b".to_string(), Expiration::Never);

        let (value, remaining) = cache.get_with_expiration("ttl").unwrap();
        assert_eq!(value, "a");
        assert!(remaining.unwrap() <= Duration::from_secs(10));

        assert_eq!(
            cache.get_with_expiration("forever"),
            Some(("b".to_string(), None))
        );
    }

    #[tokio::test]
    async fn test_cache_from_config() {
        let config = CacheConfig::default()
            .with_default_ttl(Duration::ZERO)
            .with_gc_interval(Duration::from_millis(500));
        let cache: Cache<u64> = Cache::from_config(&config).unwrap();

        assert_eq!(cache.default_ttl(), Duration::ZERO);
        assert_eq!(cache.gc_interval(), Duration::from_millis(500));

        cache.set("n", 1, Expiration::Default);
        assert_eq!(cache.get_with_expiration("n"), Some((1, None)));
    }

    #[tokio::test]
    async fn test_stop_gc_keeps_store_usable() {
        let cache = test_cache();
        assert!(cache.is_gc_running());

        cache.stop_gc().await;
        cache.stop_gc().await;
        assert!(!cache.is_gc_running());

        cache.set("key", "value".to_string(), Expiration::Never);
        assert_eq!(cache.get("key").as_deref(), Some("value"));
        assert!(cache.delete("key"));
    }

    #[tokio::test]
    async fn test_zero_gc_interval_rejected() {
        let err = Cache::<String>::new(Duration::from_secs(1), Duration::ZERO).unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfig(_)));
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let err = Cache::<String>::new(Duration::from_secs(1), Duration::from_secs(1)).unwrap_err();
        assert_eq!(err, CacheError::NoRuntime);
    }
}
