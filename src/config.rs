//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Largest supported quantization precision; keeps scaled coordinates well inside i64.
pub const MAX_COORDINATE_PRECISION: u32 = 9;

/// Public Nominatim instance.
pub const DEFAULT_UPSTREAM_URL: &str = "https://nominatim.openstreetmap.org";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Freshness window in milliseconds
    pub ttl_ms: u64,
    /// Minimum spacing between upstream requests in milliseconds
    pub min_interval_ms: u64,
    /// Decimal digits kept when quantizing coordinates into cache keys
    pub coordinate_precision: u32,
    /// Base URL of the reverse geocoding service
    pub upstream_url: String,
    /// User-Agent sent upstream
    pub user_agent: String,
    /// Upstream request timeout in milliseconds
    pub upstream_timeout_ms: u64,
    /// Nominatim zoom level (10 = city)
    pub zoom: u8,
    /// Optional Accept-Language header for localized names
    pub accept_language: Option<String>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `CACHE_TTL_MS` - Freshness window (default: 86400000, 24h)
    /// - `MIN_INTERVAL_MS` - Upstream request spacing (default: 1000)
    /// - `COORDINATE_PRECISION` - Key quantization digits (default: 3)
    /// - `UPSTREAM_URL` - Reverse geocoding base URL
    /// - `UPSTREAM_USER_AGENT` - User-Agent header
    /// - `UPSTREAM_TIMEOUT_MS` - Request timeout (default: 10000)
    /// - `UPSTREAM_ZOOM` - Nominatim zoom level (default: 10)
    /// - `ACCEPT_LANGUAGE` - Preferred name language (default: unset)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.ttl_ms),
            min_interval_ms: parse_var("MIN_INTERVAL_MS").unwrap_or(defaults.min_interval_ms),
            coordinate_precision: parse_var("COORDINATE_PRECISION")
                .unwrap_or(defaults.coordinate_precision),
            upstream_url: env::var("UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            user_agent: env::var("UPSTREAM_USER_AGENT").unwrap_or(defaults.user_agent),
            upstream_timeout_ms: parse_var("UPSTREAM_TIMEOUT_MS")
                .unwrap_or(defaults.upstream_timeout_ms),
            zoom: parse_var("UPSTREAM_ZOOM").unwrap_or(defaults.zoom),
            accept_language: env::var("ACCEPT_LANGUAGE").ok().filter(|v| !v.is_empty()),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Checks that the configured bounds can be honored.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.ttl_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "ttl must be greater than zero".to_string(),
            ));
        }
        if self.coordinate_precision > MAX_COORDINATE_PRECISION {
            return Err(CacheError::InvalidConfig(format!(
                "coordinate precision must be at most {}",
                MAX_COORDINATE_PRECISION
            )));
        }
        if self.upstream_url.trim().is_empty() {
            return Err(CacheError::InvalidConfig(
                "upstream url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 100,
            ttl_ms: 86_400_000,
            min_interval_ms: 1000,
            coordinate_precision: 3,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            user_agent: format!("locality-cache/{}", env!("CARGO_PKG_VERSION")),
            upstream_timeout_ms: 10_000,
            zoom: 10,
            accept_language: None,
            server_port: 3000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
