//! Upstream Module
//!
//! The reverse geocoding service the cache fronts.

mod nominatim;

pub use nominatim::{parse_reverse_body, NominatimClient};

use async_trait::async_trait;

use crate::error::Result;
use crate::types::LocalityResult;

// == Locality Fetcher ==
/// Resolves a coordinate pair against an external gazetteer.
///
/// `Ok(None)` means the service answered but knows no locality there.
/// Transport failures and non-success statuses are `CacheError::Network`;
/// unreadable bodies are `CacheError::Parse`.
#[async_trait]
pub trait LocalityFetcher: Send + Sync + 'static {
    async fn fetch_locality(&self, latitude: f64, longitude: f64)
        -> Result<Option<LocalityResult>>;
}
