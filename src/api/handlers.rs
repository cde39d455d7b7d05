//! API Handlers
//!
//! HTTP request handlers for each locality cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::warn;

use crate::error::Result;
use crate::models::{
    HealthResponse, LoadingResponse, LocationQuery, ResolveQuery, ResolveResponse, StatsResponse,
};
use crate::resolver::GeocodeCache;
use crate::upstream::{LocalityFetcher, NominatimClient};

/// Application state shared across all handlers.
///
/// `GeocodeCache` is internally synchronized, so the state clones freely.
#[derive(Clone)]
pub struct AppState {
    pub cache: GeocodeCache,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: GeocodeCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration, using the Nominatim client upstream.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let fetcher: Arc<dyn LocalityFetcher> = Arc::new(NominatimClient::from_config(config)?);
        Ok(Self::new(GeocodeCache::new(config, fetcher)))
    }
}

/// Handler for GET /resolve
///
/// Resolves coordinates to a locality. With `allow_stale=true`, an upstream
/// failure falls back to an expired entry when one is stored.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>> {
    let key = state.cache.key_for(query.lat, query.lon)?;

    match state.cache.resolve(query.lat, query.lon).await {
        Ok(resolution) => Ok(Json(ResolveResponse::new(&key, resolution, false))),
        Err(err) if err.is_upstream() => {
            warn!("Upstream lookup for {} failed: {}", key, err);
            if !query.allow_stale {
                return Err(err);
            }
            match state.cache.peek(query.lat, query.lon).await? {
                Some(cached) => Ok(Json(ResolveResponse::new(
                    &key,
                    cached.value,
                    !cached.fresh,
                ))),
                None => Err(err),
            }
        }
        Err(err) => Err(err),
    }
}

/// Handler for GET /loading
///
/// Reports whether an upstream lookup for the coordinates is in progress.
pub async fn loading_handler(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<LoadingResponse>> {
    let key = state.cache.key_for(query.lat, query.lon)?;
    let loading = state.cache.is_loading(query.lat, query.lon).await?;

    Ok(Json(LoadingResponse::new(&key, loading)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let in_flight = state.cache.in_flight().await;

    Json(StatsResponse::new(&stats, in_flight))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
