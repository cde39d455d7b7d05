//! Shared domain types
//!
//! Values produced by the upstream lookup and handed out by the cache.

use std::time::Duration;

use serde::Serialize;

// == Locality Result ==
/// A resolved, human-readable locality for a coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalityResult {
    /// Locality name (town, city, village...)
    pub display_name: String,
    /// Latitude reported by the upstream service
    pub latitude: f64,
    /// Longitude reported by the upstream service
    pub longitude: f64,
}

impl LocalityResult {
    pub fn new(display_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            display_name: display_name.into(),
            latitude,
            longitude,
        }
    }
}

// == Resolution ==
/// Outcome of a successful lookup.
///
/// `NotFound` is the negative marker: upstream answered, but had no locality
/// for the coordinates. It is cached like any other value.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(LocalityResult),
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// Returns the locality, if any.
    pub fn locality(&self) -> Option<&LocalityResult> {
        match self {
            Resolution::Found(locality) => Some(locality),
            Resolution::NotFound => None,
        }
    }
}

impl From<Option<LocalityResult>> for Resolution {
    fn from(value: Option<LocalityResult>) -> Self {
        value.map_or(Resolution::NotFound, Resolution::Found)
    }
}

// == Cached Resolution ==
/// A stored value observed without refreshing it.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResolution {
    pub value: Resolution,
    /// Whether the entry is still inside its freshness window
    pub fresh: bool,
    /// Time since the entry was stored
    pub age: Duration,
}
