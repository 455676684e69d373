//! Cache Module
//!
//! Provides in-memory caching with case-insensitive keys, TTL expiration,
//! LRU eviction and single-flight passthrough loads.

mod entry;
mod lru;
mod passthrough;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use passthrough::PassthroughCache;
pub use stats::CacheStats;
pub use store::CacheStore;
