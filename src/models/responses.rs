//! Response DTOs for the locality cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheKey, CacheStats};
use crate::types::{LocalityResult, Resolution};

/// Response body for `GET /resolve`
#[derive(Debug, Clone, Serialize)]
pub struct ResolveResponse {
    /// Quantized key the coordinates mapped to
    pub key: String,
    /// False when upstream knows no locality at these coordinates
    pub found: bool,
    pub locality: Option<LocalityResult>,
    /// True when served from an expired entry after an upstream failure
    pub stale: bool,
}

impl ResolveResponse {
    pub fn new(key: &CacheKey, resolution: Resolution, stale: bool) -> Self {
        let locality = match resolution {
            Resolution::Found(locality) => Some(locality),
            Resolution::NotFound => None,
        };
        Self {
            key: key.to_string(),
            found: locality.is_some(),
            locality,
            stale,
        }
    }
}

/// Response body for `GET /loading`
#[derive(Debug, Clone, Serialize)]
pub struct LoadingResponse {
    pub key: String,
    pub loading: bool,
}

impl LoadingResponse {
    pub fn new(key: &CacheKey, loading: bool) -> Self {
        Self {
            key: key.to_string(),
            loading,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub negative_hits: u64,
    pub misses: u64,
    pub stale_misses: u64,
    pub evictions: u64,
    pub upstream_requests: u64,
    pub upstream_failures: u64,
    pub coalesced: u64,
    /// Upstream lookups currently running
    pub in_flight: usize,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, in_flight: usize) -> Self {
        Self {
            hits: stats.hits,
            negative_hits: stats.negative_hits,
            misses: stats.misses,
            stale_misses: stats.stale_misses,
            evictions: stats.evictions,
            upstream_requests: stats.upstream_requests,
            upstream_failures: stats.upstream_failures,
            coalesced: stats.coalesced,
            in_flight,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
