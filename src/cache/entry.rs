//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with lazy freshness checks.

use std::time::Duration;

use tokio::time::Instant;

use crate::types::Resolution;

// == Cache Entry ==
/// Represents a single cache entry with value and insertion time.
///
/// Uses tokio's clock so tests can drive expiry with a paused runtime.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored resolution (locality or negative marker)
    pub value: Resolution,
    /// When the value was stored
    pub inserted_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stored at `inserted_at`.
    pub fn new(value: Resolution, inserted_at: Instant) -> Self {
        Self { value, inserted_at }
    }

    // == Age ==
    /// Time elapsed since insertion, saturating at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry is still inside its freshness window.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale.
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) < ttl
    }
}
