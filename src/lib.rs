//! Locality Cache - A rate-limited reverse geocoding cache
//!
//! Resolves coordinates to locality names through a bounded LRU cache with
//! lazy TTL expiry, coalescing concurrent lookups and spacing upstream
//! requests to respect the service's fair-use policy.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod resolver;
pub mod types;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{CacheError, Result};
pub use limiter::RateLimiter;
pub use resolver::GeocodeCache;
pub use types::{CachedResolution, LocalityResult, Resolution};
pub use upstream::{LocalityFetcher, NominatimClient};
