//! Passthrough Cache Module
//!
//! Concurrent engine wrapping [`CacheStore`] with a single-flight
//! get-or-compute path.
//!
//! Every read and write is serialized through one async RwLock, which
//! keeps the capacity invariant intact under concurrent inserts. The
//! single-flight table is a plain std mutex: it is only ever locked for
//! map bookkeeping and never held across an await point, so a leader's
//! teardown can also run from a synchronous Drop.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::cache::store::normalize_key;
use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Flight Bookkeeping ==
/// Shared outcome of one in-flight factory call.
type FlightOutcome<T> = std::result::Result<Option<T>, Arc<anyhow::Error>>;

type FlightTable<T> = Mutex<HashMap<String, broadcast::Sender<FlightOutcome<T>>>>;

fn lock_flights<T>(
    flights: &FlightTable<T>,
) -> MutexGuard<'_, HashMap<String, broadcast::Sender<FlightOutcome<T>>>> {
    // A poisoned flight table still holds a structurally valid map
    flights.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result of trying to join the in-flight load for a key.
enum Flight<T> {
    /// Another caller's factory is already running; await its outcome
    Join(broadcast::Receiver<FlightOutcome<T>>),
    /// This caller was elected leader and must run the factory
    Lead(FlightGuard<T>),
}

/// Removes the flight entry for a key when the leader finishes, or when
/// the leader future is dropped mid-flight. Dropping the entry drops its
/// only sender, which wakes every follower so a fresh leader can be
/// elected; an abandoned factory therefore never leaves a value
/// half-written or a flight stuck.
struct FlightGuard<T> {
    flights: Arc<FlightTable<T>>,
    key: String,
    armed: bool,
}

impl<T> FlightGuard<T> {
    fn new(flights: Arc<FlightTable<T>>, key: String) -> Self {
        Self {
            flights,
            key,
            armed: true,
        }
    }

    /// Tears the flight down on the normal completion path, returning the
    /// sender so the outcome can be broadcast to followers.
    fn complete(mut self) -> Option<broadcast::Sender<FlightOutcome<T>>> {
        self.armed = false;
        lock_flights(&self.flights).remove(&self.key)
    }
}

impl<T> Drop for FlightGuard<T> {
    fn drop(&mut self) {
        if self.armed {
            lock_flights(&self.flights).remove(&self.key);
        }
    }
}

// == Passthrough Cache ==
/// Thread-safe passthrough cache with case-insensitive keys, lazy TTL
/// expiration, optional LRU eviction and single-flight loads.
///
/// Cloning is cheap and yields a handle to the same cache.
///
/// # Example
/// ```
/// use passthrough_cache::PassthroughCache;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> passthrough_cache::Result<()> {
/// let cache: PassthroughCache<String> = PassthroughCache::bounded(128)?;
///
/// let value = cache
///     .get_or_compute("tenant-42", || async { Ok(Some("profile".to_string())) }, None)
///     .await?;
/// assert_eq!(value.as_deref(), Some("profile"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PassthroughCache<T> {
    /// Shared cache core; the write lock globally serializes mutations
    store: Arc<RwLock<CacheStore<T>>>,
    /// One entry per key with an outstanding factory call
    flights: Arc<FlightTable<T>>,
}

impl<T> Clone for PassthroughCache<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            flights: Arc::clone(&self.flights),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> PassthroughCache<T> {
    // == Constructors ==
    /// Creates an unbounded (TTL-only) cache.
    pub fn unbounded() -> Self {
        Self::from_store(CacheStore::unbounded())
    }

    /// Creates a bounded (LRU + TTL) cache.
    ///
    /// Fails fast with [`CacheError::InvalidCapacity`] when `capacity` is
    /// zero.
    pub fn bounded(capacity: usize) -> Result<Self> {
        Ok(Self::from_store(CacheStore::bounded(capacity)?))
    }

    /// Creates a cache from configuration; an absent capacity selects the
    /// unbounded variant.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        match config.capacity {
            Some(capacity) => Self::bounded(capacity),
            None => Ok(Self::unbounded()),
        }
    }

    fn from_store(store: CacheStore<T>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            flights: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // == Get ==
    /// Retrieves a value by key, case-insensitively.
    ///
    /// Takes the write lock because a read may refresh recency or lazily
    /// remove an expired entry.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.store.write().await.get(key)
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// A `None` value is a defined no-op; see [`CacheStore::set`].
    pub async fn set(&self, key: &str, value: Option<T>, ttl: Option<Duration>) {
        self.store.write().await.set(key, value, ttl);
    }

    // == Remove ==
    /// Removes an entry, returning the removed live value. Idempotent.
    pub async fn remove(&self, key: &str) -> Option<T> {
        self.store.write().await.remove(key)
    }

    // == Pop ==
    /// Retrieves and removes an entry in one step.
    pub async fn pop(&self, key: &str) -> Option<T> {
        self.store.write().await.pop(key)
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, or computes it via `factory`.
    ///
    /// On a hit the factory is never invoked. On a miss, at most one
    /// factory call per key is in flight at a time: the first caller runs
    /// the factory while concurrent callers for the same key await the
    /// shared outcome; callers for different keys never block on each
    /// other.
    ///
    /// A factory returning `Ok(Some(v))` stores `v` before any waiter
    /// observes it; `Ok(None)` stores nothing and yields `None` to every
    /// waiter. A factory error is propagated to every waiter as
    /// [`CacheError::FactoryFailed`] and is not cached, so the next call
    /// for the key retries.
    ///
    /// Synchronous factories just wrap their result in an async block.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &str,
        factory: F,
        ttl: Option<Duration>,
    ) -> Result<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Option<T>>>,
    {
        let flight_key = normalize_key(key);

        loop {
            // A hit never invokes the factory
            if let Some(value) = self.store.write().await.get(key) {
                return Ok(Some(value));
            }

            match self.join_flight(&flight_key) {
                Flight::Join(mut receiver) => {
                    debug!(key, "waiting on in-flight load");
                    match receiver.recv().await {
                        Ok(outcome) => return outcome.map_err(CacheError::FactoryFailed),
                        // The leader was dropped mid-flight; elect anew
                        Err(_) => continue,
                    }
                }
                Flight::Lead(guard) => return self.lead_flight(guard, key, factory, ttl).await,
            }
        }
    }

    /// Subscribes to the outstanding flight for a key, or registers a new
    /// one with this caller as leader.
    fn join_flight(&self, flight_key: &str) -> Flight<T> {
        let mut flights = lock_flights(&self.flights);

        match flights.get(flight_key) {
            Some(sender) => Flight::Join(sender.subscribe()),
            None => {
                let (sender, _) = broadcast::channel(1);
                flights.insert(flight_key.to_string(), sender);
                Flight::Lead(FlightGuard::new(
                    Arc::clone(&self.flights),
                    flight_key.to_string(),
                ))
            }
        }
    }

    /// Runs the factory as flight leader and broadcasts the outcome.
    async fn lead_flight<F, Fut>(
        &self,
        guard: FlightGuard<T>,
        key: &str,
        factory: F,
        ttl: Option<Duration>,
    ) -> Result<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Option<T>>>,
    {
        debug!(key, "computing value for cold key");

        let outcome: FlightOutcome<T> = match factory().await {
            Ok(Some(value)) => {
                self.store.write().await.set(key, Some(value.clone()), ttl);
                Ok(Some(value))
            }
            // A factory that produced nothing stores nothing
            Ok(None) => Ok(None),
            Err(error) => Err(Arc::new(error)),
        };

        // The value must be stored before the flight entry disappears, so
        // a caller that misses the broadcast finds it in the store
        if let Some(sender) = guard.complete() {
            let _ = sender.send(outcome.clone());
        }

        outcome.map_err(CacheError::FactoryFailed)
    }

    // == Sweep Expired ==
    /// Removes every expired entry; see [`CacheStore::sweep_expired`].
    pub async fn sweep_expired(&self) -> usize {
        self.store.write().await.sweep_expired()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Capacity ==
    /// Returns the configured capacity bound, or None when unbounded.
    pub async fn capacity(&self) -> Option<usize> {
        self.store.read().await.capacity()
    }

    // == Length ==
    /// Returns the current number of live entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
