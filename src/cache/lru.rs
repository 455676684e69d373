//! LRU Tracker Module
//!
//! Implements least-recently-used recency tracking for cache eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks the recency ordering used by the bounded cache variant.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Entries that are never touched again keep their insertion order, so
/// eviction ties between untouched entries break in original insertion
/// order.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Normalized keys ordered by last access
    order: VecDeque<String>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// An existing key is moved to the front; a new key is inserted there.
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop LRU ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the tracker is empty.
    pub fn pop_lru(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    // == Peek LRU ==
    /// Returns the least recently used key without removing it.
    pub fn peek_lru(&self) -> Option<&String> {
        self.order.back()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.peek_lru(), None);
    }

    #[test]
    fn test_lru_touch_keeps_insertion_order() {
        let mut lru = LruTracker::new();

        lru.touch("key1");
        lru.touch("key2");
        lru.touch("key3");

        assert_eq!(lru.len(), 3);
        // key1 was inserted first and never touched again, so it is LRU
        assert_eq!(lru.peek_lru(), Some(&"key1".to_string()));
    }

    #[test]
    fn test_lru_touch_refreshes_recency() {
        let mut lru = LruTracker::new();

        lru.touch("key1");
        lru.touch("key2");
        lru.touch("key3");

        lru.touch("key1");

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_lru(), Some(&"key2".to_string()));
    }

    #[test]
    fn test_lru_pop_order() {
        let mut lru = LruTracker::new();

        lru.touch("a");
        lru.touch("b");
        lru.touch("c");

        // Refresh a and c; b becomes the eviction candidate
        lru.touch("a");
        lru.touch("c");

        assert_eq!(lru.pop_lru(), Some("b".to_string()));
        assert_eq!(lru.pop_lru(), Some("a".to_string()));
        assert_eq!(lru.pop_lru(), Some("c".to_string()));
        assert_eq!(lru.pop_lru(), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();

        lru.touch("key1");
        lru.touch("key2");
        lru.touch("key3");

        lru.remove("key2");

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains("key2"));
        assert!(lru.contains("key1"));
        assert!(lru.contains("key3"));
    }

    #[test]
    fn test_lru_remove_unknown_key() {
        let mut lru = LruTracker::new();

        lru.touch("key1");
        lru.remove("missing");

        assert_eq!(lru.len(), 1);
        assert!(lru.contains("key1"));
    }

    #[test]
    fn test_lru_touch_is_idempotent_on_membership() {
        let mut lru = LruTracker::new();

        lru.touch("key1");
        lru.touch("key1");
        lru.touch("key1");

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.pop_lru(), Some("key1".to_string()));
        assert!(lru.is_empty());
    }
}
