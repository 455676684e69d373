//! Cache Store Module
//!
//! Single-threaded cache core combining the normalized-key index with
//! optional LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::{CacheError, Result};

// == Key Normalization ==
/// Normalizes a key for case-insensitive addressing.
///
/// Uniqueness is enforced on the lowercased form; the caller's original
/// casing is never stored.
pub(crate) fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

// == Cache Store ==
/// Cache core with case-insensitive keys, lazy TTL expiration and optional
/// LRU eviction.
///
/// The store itself is not synchronized; [`PassthroughCache`] wraps it
/// behind a lock for concurrent use.
///
/// Invariants:
/// - the index and the recency ordering always agree on membership
///   (the ordering is maintained only when a capacity bound is set);
/// - after any completed mutation the index holds at most `capacity`
///   entries.
///
/// [`PassthroughCache`]: crate::cache::PassthroughCache
#[derive(Debug)]
pub struct CacheStore<T> {
    /// Normalized-key index
    entries: HashMap<String, CacheEntry<T>>,
    /// Recency ordering, maintained only in bounded mode
    lru: LruTracker,
    /// Maximum number of live entries, None = unbounded
    capacity: Option<usize>,
    /// Performance counters
    stats: CacheStats,
}

impl<T: Clone> CacheStore<T> {
    // == Constructors ==
    /// Creates an unbounded (TTL-only) store.
    pub fn unbounded() -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            capacity: None,
            stats: CacheStats::new(),
        }
    }

    /// Creates a bounded (LRU + TTL) store.
    ///
    /// Fails fast with [`CacheError::InvalidCapacity`] when `capacity` is
    /// zero.
    pub fn bounded(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            capacity: Some(capacity),
            stats: CacheStats::new(),
        })
    }

    // == Get ==
    /// Retrieves a value by key, case-insensitively.
    ///
    /// An entry whose TTL has elapsed is logically absent: it is removed
    /// on the spot and reported as a miss. In bounded mode a hit refreshes
    /// the entry's recency.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let key = normalize_key(key);

        match self.entries.get(&key) {
            Some(entry) if entry.is_expired() => {
                // Lazy expiration: drop the entry the moment it is touched
                self.entries.remove(&key);
                if self.capacity.is_some() {
                    self.lru.remove(&key);
                }
                self.stats.record_expiration();
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                debug!(%key, "entry expired on access");
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                if self.capacity.is_some() {
                    self.lru.touch(&key);
                }
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// A `None` value is a defined no-op: nothing is stored and any
    /// existing entry for the key is left untouched. An existing key is
    /// replaced in place (value, expiry and recency) without triggering
    /// eviction. In bounded mode, inserting a brand-new key at capacity
    /// first evicts exactly one least-recently-used entry, so capacity is
    /// never transiently exceeded.
    pub fn set(&mut self, key: &str, value: Option<T>, ttl: Option<Duration>) {
        let Some(value) = value else {
            return;
        };

        let key = normalize_key(key);
        let is_update = self.entries.contains_key(&key);

        if let Some(capacity) = self.capacity {
            if !is_update && self.entries.len() >= capacity {
                if let Some(evicted) = self.lru.pop_lru() {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                    debug!(key = %evicted, "evicted least recently used entry");
                }
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        if self.capacity.is_some() {
            self.lru.touch(&key);
        }
        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Removes an entry by key, returning the removed live value.
    ///
    /// Idempotent: removing an absent key is a no-op returning None. An
    /// entry whose TTL had already elapsed is physically removed but
    /// reported as absent.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let key = normalize_key(key);
        let entry = self.entries.remove(&key)?;

        if self.capacity.is_some() {
            self.lru.remove(&key);
        }
        self.stats.set_total_entries(self.entries.len());

        if entry.is_expired() {
            self.stats.record_expiration();
            None
        } else {
            Some(entry.value)
        }
    }

    // == Pop ==
    /// Retrieves and removes an entry in one step.
    pub fn pop(&mut self, key: &str) -> Option<T> {
        let value = self.get(key);
        self.remove(key);
        value
    }

    // == Sweep Expired ==
    /// Removes every expired entry from the store.
    ///
    /// Lazy expiration already guarantees correctness; sweeping only bounds
    /// how long expired entries may retain memory (and, in bounded mode,
    /// capacity). Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            if self.capacity.is_some() {
                self.lru.remove(&key);
            }
            self.stats.record_expiration();
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Capacity ==
    /// Returns the configured capacity bound, or None when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
