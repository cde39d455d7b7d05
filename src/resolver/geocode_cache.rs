//! Geocode Cache
//!
//! Resolves coordinates to localities through the cache, the rate limiter
//! and the upstream fetcher, coalescing concurrent lookups of the same key.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheStats, CacheStore, Lookup};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::limiter::RateLimiter;
use crate::types::{CachedResolution, Resolution};
use crate::upstream::LocalityFetcher;

/// Outcome published to every caller waiting on one upstream fetch.
type Outcome = Result<Resolution>;

/// Waiters subscribe here; `None` until the fetch finishes.
type OutcomeReceiver = watch::Receiver<Option<Outcome>>;

// == Geocode Cache ==
/// Rate-limited, coalescing reverse geocoding cache.
///
/// Cheap to clone; clones share the same cache, limiter and in-flight table.
#[derive(Clone)]
pub struct GeocodeCache {
    inner: Arc<Inner>,
}

struct Inner {
    /// Cache contents and the in-flight table, guarded together so a fetch
    /// outcome is stored and unregistered in one step
    state: Mutex<ResolverState>,
    limiter: RateLimiter,
    fetcher: Arc<dyn LocalityFetcher>,
    precision: u32,
}

struct ResolverState {
    store: CacheStore,
    in_flight: HashMap<CacheKey, OutcomeReceiver>,
}

/// What `resolve` decided to do while holding the state lock.
enum Plan {
    Hit(Resolution),
    Wait(OutcomeReceiver),
}

impl GeocodeCache {
    // == Constructor ==
    /// Creates a cache from configuration and an upstream fetcher.
    pub fn new(config: &Config, fetcher: Arc<dyn LocalityFetcher>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(ResolverState {
                    store: CacheStore::new(config.capacity, config.ttl()),
                    in_flight: HashMap::new(),
                }),
                limiter: RateLimiter::new(config.min_interval()),
                fetcher,
                precision: config.coordinate_precision,
            }),
        }
    }

    /// Quantizes coordinates into this cache's key space.
    pub fn key_for(&self, latitude: f64, longitude: f64) -> Result<CacheKey> {
        CacheKey::from_coordinates(latitude, longitude, self.inner.precision)
    }

    // == Resolve ==
    /// Resolves a coordinate pair to a locality or a negative marker.
    ///
    /// Fresh entries are served without touching the limiter. Otherwise the
    /// caller joins the in-flight fetch for the key, or starts one. Upstream
    /// failures are returned uncached and leave any stale entry in place.
    ///
    /// Dropping the returned future only detaches this caller: the fetch
    /// keeps running for other waiters and its result is still cached.
    pub async fn resolve(&self, latitude: f64, longitude: f64) -> Result<Resolution> {
        let key = self.key_for(latitude, longitude)?;

        let plan = {
            let mut state = self.inner.state.lock().await;
            match state.store.lookup(&key, Instant::now()) {
                Lookup::Fresh(value) => {
                    debug!("Cache hit for {}", key);
                    Plan::Hit(value)
                }
                Lookup::Stale | Lookup::Missing => Plan::Wait(self.join_or_start(&mut state, key)),
            }
        };

        match plan {
            Plan::Hit(value) => Ok(value),
            Plan::Wait(rx) => wait_for_outcome(rx).await,
        }
    }

    /// Subscribes to the live fetch for `key`, or spawns a new one.
    fn join_or_start(&self, state: &mut ResolverState, key: CacheKey) -> OutcomeReceiver {
        state.prune_dead_lookups();
        if let Some(rx) = state.in_flight.get(&key) {
            debug!("Joining in-flight lookup for {}", key);
            state.store.stats_mut().record_coalesced();
            return rx.clone();
        }

        debug!("Cache miss for {}, scheduling upstream lookup", key);
        let (tx, rx) = watch::channel(None);
        state.in_flight.insert(key, rx.clone());

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.fetch_and_store(key).await;
            let _ = tx.send(Some(outcome));
        });

        rx
    }

    // == Peek ==
    /// Returns whatever is stored for the coordinates, fresh or stale.
    ///
    /// Never touches the network, recency or statistics. Callers use this to
    /// fall back on an old value after an upstream failure.
    pub async fn peek(&self, latitude: f64, longitude: f64) -> Result<Option<CachedResolution>> {
        let key = self.key_for(latitude, longitude)?;
        let state = self.inner.state.lock().await;
        Ok(state.store.peek(&key, Instant::now()))
    }

    // == Loading State ==
    /// Whether an upstream lookup for these coordinates is in progress.
    pub async fn is_loading(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let key = self.key_for(latitude, longitude)?;
        let mut state = self.inner.state.lock().await;
        state.prune_dead_lookups();
        Ok(state.in_flight.contains_key(&key))
    }

    /// Number of upstream lookups in progress.
    pub async fn in_flight(&self) -> usize {
        let mut state = self.inner.state.lock().await;
        state.prune_dead_lookups();
        state.in_flight.len()
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.inner.state.lock().await.store.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.state.lock().await.store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.state.lock().await.store.is_empty()
    }
}

impl ResolverState {
    /// Drops slots whose fetch task ended without publishing (it panicked).
    ///
    /// A finished fetch unregisters itself before sending, so a closed
    /// sender on a registered slot only happens on that path.
    fn prune_dead_lookups(&mut self) {
        self.in_flight.retain(|key, rx| {
            let alive = rx.has_changed().is_ok();
            if !alive {
                warn!("Lookup task for {} ended without a result", key);
            }
            alive
        });
    }
}

impl Inner {
    /// Runs one upstream lookup and records its outcome.
    ///
    /// Nothing is awaited between the limiter permit and the request, and
    /// the state lock is not held across either.
    async fn fetch_and_store(&self, key: CacheKey) -> Outcome {
        self.limiter.acquire().await;

        info!("Upstream lookup for {}", key);
        let fetched = self
            .fetcher
            .fetch_locality(key.latitude(), key.longitude())
            .await;

        let mut state = self.state.lock().await;
        state.in_flight.remove(&key);
        state.store.stats_mut().record_upstream_request();

        match fetched {
            Ok(locality) => {
                let value = Resolution::from(locality);
                if let Some(evicted) = state.store.insert(key, value.clone(), Instant::now()) {
                    debug!("Evicted least recently used entry {}", evicted);
                }
                Ok(value)
            }
            Err(err) => {
                state.store.stats_mut().record_upstream_failure();
                debug!("Upstream lookup for {} failed: {}", key, err);
                Err(err)
            }
        }
    }
}

/// Waits until the fetch behind `rx` publishes its outcome.
async fn wait_for_outcome(mut rx: OutcomeReceiver) -> Result<Resolution> {
    let published = rx
        .wait_for(Option::is_some)
        .await
        .map_err(|_| CacheError::Internal("lookup task ended without a result".to_string()))?;

    (*published)
        .clone()
        .unwrap_or_else(|| Err(CacheError::Internal("lookup result missing".to_string())))
}
