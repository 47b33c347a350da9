//! Cache Statistics Module
//!
//! Tracks read hits and misses plus expiration sweep activity.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of the cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of reads that returned a value
    pub hits: u64,
    /// Number of reads that found nothing (key absent or expired)
    pub misses: u64,
    /// Entries removed by expiration sweeps, manual or background
    pub expired_removed: u64,
    /// Number of background sweeps that have run
    pub sweeps: u64,
    /// Entries currently stored, including expired ones not yet swept
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Lock-free counters shared by readers and the background sweeper.
///
/// Reads only hold the store's shared lock, so counters cannot live
/// behind it.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    expired_removed: AtomicU64,
    sweeps: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expired(&self, count: usize) {
        self.expired_removed
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_sweep(&self) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the counters into a [`CacheStats`].
    pub fn snapshot(&self, total_entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired_removed: self.expired_removed.load(Ordering::Relaxed),
            sweeps: self.sweeps.load(Ordering::Relaxed),
            total_entries,
        }
    }
}
