//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache engine configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Maximum number of live entries; None selects the unbounded variant
    pub capacity: Option<usize>,
    /// Interval for the optional expired-entry sweeper; None disables it
    pub sweep_interval: Option<Duration>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum live entries (default: unbounded)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Sweeper frequency in seconds (default: disabled)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY").ok().and_then(|v| v.parse().ok()),
            sweep_interval: env::var("CACHE_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }

    /// Sets a capacity bound, selecting the LRU-evicting variant.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Enables the background expired-entry sweeper.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_is_unbounded() {
        let config = CacheConfig::default();
        assert!(config.capacity.is_none());
        assert!(config.sweep_interval.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = CacheConfig::default()
            .with_capacity(64)
            .with_sweep_interval(Duration::from_secs(5));
        assert_eq!(config.capacity, Some(64));
        assert_eq!(config.sweep_interval, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_SWEEP_INTERVAL_SECS");

        let config = CacheConfig::from_env();
        assert!(config.capacity.is_none());
        assert!(config.sweep_interval.is_none());
    }
}
