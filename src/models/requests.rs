//! Request DTOs for the locality cache API
//!
//! Defines the query strings accepted by the HTTP endpoints.

use serde::Deserialize;

/// Query for `GET /resolve`
///
/// # Fields
/// - `lat`, `lon`: Coordinates to resolve
/// - `allow_stale`: Serve a stored stale value if the upstream lookup fails
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub allow_stale: bool,
}

/// Query for `GET /loading`
#[derive(Debug, Clone, Deserialize)]
pub struct LocationQuery {
    pub lat: f64,
    pub lon: f64,
}
