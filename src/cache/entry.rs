//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Creation time
    pub created_at: Instant,
    /// Expiration time, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// The absolute expiration time is computed at insertion time as
    /// current-time-plus-ttl. A `ttl` of None means the entry never expires.
    pub fn new(value: T, ttl: Option<Duration>) -> Self {
        let now = Instant::now();

        Self {
            value,
            created_at: now,
            expires_at: ttl.map(|ttl| now + ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired when the current
    /// time is greater than or equal to the expiration time, so an entry is
    /// expired the instant its TTL has fully elapsed.
    ///
    /// # Returns
    /// - `true` if the entry has a TTL and the current time >= expiration time
    /// - `false` if the entry has no TTL (never expires) or TTL hasn't elapsed
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// Useful for diagnostics; returns `Duration::ZERO` once the entry
    /// has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new("test_value".to_string(), None);

        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("test_value".to_string(), Some(Duration::from_secs(60)));

        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("test_value".to_string(), Some(Duration::from_millis(50)));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("test_value".to_string(), Some(Duration::from_secs(10)));

        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_ttl_remaining_no_expiration() {
        let entry = CacheEntry::new("test_value".to_string(), None);

        assert!(entry.ttl_remaining().is_none());
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new("test_value".to_string(), Some(Duration::from_millis(10)));

        sleep(Duration::from_millis(30));

        assert_eq!(entry.ttl_remaining().unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry {
            value: "test".to_string(),
            created_at: now,
            expires_at: Some(now), // Expires exactly at creation time
        };

        // Entry is expired when current time >= expires_at
        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_entry_holds_non_string_values() {
        let entry = CacheEntry::new(vec![1u8, 2, 3], None);
        assert_eq!(entry.value, vec![1, 2, 3]);
    }
}
