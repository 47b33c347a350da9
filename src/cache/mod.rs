//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL expiration.

mod entry;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, Expiration};
pub use handle::Cache;
pub use stats::{CacheStats, StatsRecorder};
pub use store::CacheStore;
