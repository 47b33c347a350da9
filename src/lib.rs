//! TTL Cache - A lightweight in-process key-value cache
//!
//! Associates each key with a value and an optional time-to-live. Expired
//! entries read as absent immediately and are physically removed by a
//! background sweep running on the Tokio runtime.
//!
//! ```
//! use std::time::Duration;
//! use ttl_cache::{Cache, Expiration};
//!
//! #[tokio::main]
//! async fn main() -> ttl_cache::Result<()> {
//!     let cache = Cache::new(Duration::from_secs(60), Duration::from_secs(5))?;
//!
//!     cache.set("session", "token".to_string(), Duration::from_secs(30));
//!     cache.set("config", "v1".to_string(), Expiration::Never);
//!
//!     assert_eq!(cache.get("session").as_deref(), Some("token"));
//!     assert!(cache.get("unknown").is_none());
//!
//!     cache.stop_gc().await;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheStats, Expiration};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
