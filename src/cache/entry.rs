//! Cache Entry Module
//!
//! Defines individual cache entries and the TTL request type used by `set`.

use std::time::Duration;

use chrono::Utc;

// == Expiration ==
/// Lifetime requested for an entry when it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiration {
    /// Use the cache's configured default TTL.
    #[default]
    Default,
    /// The entry never expires.
    Never,
    /// The entry expires once the given duration has elapsed.
    ///
    /// A zero duration is treated like [`Expiration::Default`].
    After(Duration),
}

impl Expiration {
    /// Resolves this request into a concrete TTL, `None` meaning "never".
    ///
    /// A zero default TTL also means "never".
    pub fn resolve(self, default_ttl: Duration) -> Option<Duration> {
        let ttl = match self {
            Expiration::Never => return None,
            Expiration::Default => default_ttl,
            Expiration::After(d) if d.is_zero() => default_ttl,
            Expiration::After(d) => d,
        };
        (!ttl.is_zero()).then_some(ttl)
    }
}

impl From<Duration> for Expiration {
    fn from(ttl: Duration) -> Self {
        Expiration::After(ttl)
    }
}

impl From<Option<Duration>> for Expiration {
    fn from(ttl: Option<Duration>) -> Self {
        ttl.map_or(Expiration::Never, Expiration::After)
    }
}

// == Cache Entry ==
/// A single stored value with its expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix nanoseconds)
    pub created_at: i64,
    /// Expiration timestamp (Unix nanoseconds), None = no expiration
    pub expires_at: Option<i64>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry living for `ttl`, or forever when `ttl` is `None`.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        let now = current_timestamp_nanos();
        let expires_at = ttl.map(|ttl| now.saturating_add(duration_nanos(ttl)));

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks expiry against an explicit timestamp.
    ///
    /// An entry is expired only once `now` is strictly past its expiration
    /// timestamp. Entries without one never expire.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires| now > expires)
    }

    /// Checks expiry against the current clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_nanos())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if no expiration is set.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at.map(|expires| {
            let remaining = expires.saturating_sub(current_timestamp_nanos());
            Duration::from_nanos(u64::try_from(remaining).unwrap_or(0))
        })
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in nanoseconds.
///
/// Saturates at `i64::MAX`, which chrono reaches in the year 2262.
pub fn current_timestamp_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

fn duration_nanos(d: Duration) -> i64 {
    i64::try_from(d.as_nanos()).unwrap_or(i64::MAX)
}
