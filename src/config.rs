//! Configuration Module
//!
//! Construction parameters for a cache, optionally loaded from environment
//! variables.

use std::env;
use std::time::Duration;

const DEFAULT_TTL_SECS: u64 = 300;
const DEFAULT_GC_INTERVAL_SECS: u64 = 1;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied to entries stored with `Expiration::Default`; zero = never expire
    pub default_ttl: Duration,
    /// Interval between background expiration sweeps
    pub gc_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds, 0 = never expire (default: 300)
    /// - `GC_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            default_ttl: Duration::from_secs(env_secs("DEFAULT_TTL", DEFAULT_TTL_SECS)),
            gc_interval: Duration::from_secs(env_secs("GC_INTERVAL", DEFAULT_GC_INTERVAL_SECS)),
        }
    }

    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    pub fn with_gc_interval(mut self, gc_interval: Duration) -> Self {
        self.gc_interval = gc_interval;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            gc_interval: Duration::from_secs(DEFAULT_GC_INTERVAL_SECS),
        }
    }
}

fn env_secs(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl, Duration::from_secs(300));
        assert_eq!(config.gc_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_config_builders() {
        let config = CacheConfig::default()
            .with_default_ttl(Duration::ZERO)
            .with_gc_interval(Duration::from_millis(250));
        assert_eq!(config.default_ttl, Duration::ZERO);
        assert_eq!(config.gc_interval, Duration::from_millis(250));
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        env::remove_var("DEFAULT_TTL");
        env::remove_var("GC_INTERVAL");

        assert_eq!(CacheConfig::from_env(), CacheConfig::default());
    }

    #[test]
    #[serial]
    fn test_config_from_env_overrides() {
        env::set_var("DEFAULT_TTL", "5");
        env::set_var("GC_INTERVAL", " 3 ");

        let config = CacheConfig::from_env();
        assert_eq!(config.default_ttl, Duration::from_secs(5));
        assert_eq!(config.gc_interval, Duration::from_secs(3));

        env::remove_var("DEFAULT_TTL");
        env::remove_var("GC_INTERVAL");
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_falls_back() {
        env::set_var("DEFAULT_TTL", "soon");
        env::remove_var("GC_INTERVAL");

        let config = CacheConfig::from_env();
        assert_eq!(config.default_ttl, Duration::from_secs(300));

        env::remove_var("DEFAULT_TTL");
    }
}
