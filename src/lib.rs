//! Passthrough Cache - a unified in-memory cache engine
//!
//! Case-insensitive key addressing, optional per-entry TTL with lazy
//! expiration, an optional capacity bound with LRU eviction, and a
//! get-or-compute path with a single-flight guarantee: concurrent misses
//! for the same key share one factory invocation and one outcome.
//!
//! The cache is a single-process, in-memory structure; it never
//! serializes its contents and exposes no wire protocol.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, CacheStore, PassthroughCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweeper_task;
