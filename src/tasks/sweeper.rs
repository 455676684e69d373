//! Expired-Entry Sweeper Task
//!
//! Opt-in background task that periodically removes expired cache entries.
//! Expiration is detected lazily on access either way; the sweeper only
//! bounds how long an expired-but-never-touched entry may retain memory
//! and, in bounded mode, capacity.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::PassthroughCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task sleeps for `interval` between sweeps and holds the cache's
/// write lock only for the duration of each sweep.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it to stop sweeping, e.g.
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache: PassthroughCache<String> = PassthroughCache::unbounded();
/// let sweeper = spawn_sweeper_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper_task<T: Clone + Send + Sync + 'static>(
    cache: PassthroughCache<T>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting expired-entry sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_expired().await;

            if removed > 0 {
                info!(removed, "sweeper removed expired entries");
            } else {
                debug!("sweeper found no expired entries");
            }
        }
    })
}
