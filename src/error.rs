//! Error types for the cache
//!
//! Reads and writes never fail; only constructing a cache can.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building a [`crate::Cache`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Construction parameters are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No Tokio runtime is available to run the background sweeper
    #[error("No Tokio runtime available to spawn the expiration sweeper")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
