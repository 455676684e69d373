//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use std::sync::Arc;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
///
/// Get, set and remove are total over well-formed inputs and never fail;
/// the only error sources are construction (invalid capacity) and the
/// get-or-compute value factory.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// Capacity bound given at construction was not a positive number
    #[error("Invalid capacity: bound must be a positive number of entries")]
    InvalidCapacity,

    /// The value factory of a get-or-compute call failed
    ///
    /// The failure is shared behind an `Arc` so that every caller waiting
    /// on the same in-flight load observes the same underlying error.
    #[error("Value factory failed: {0}")]
    FactoryFailed(Arc<anyhow::Error>),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
