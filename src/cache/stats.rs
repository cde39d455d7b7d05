//! Cache Statistics Module
//!
//! Tracks cache performance metrics and upstream traffic.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a fresh entry
    pub hits: u64,
    /// Hits that returned a negative marker
    pub negative_hits: u64,
    /// Lookups that found no entry or a stale one
    pub misses: u64,
    /// Misses that found a stale entry
    pub stale_misses: u64,
    /// Entries evicted due to LRU policy
    pub evictions: u64,
    /// Requests sent to the upstream service
    pub upstream_requests: u64,
    /// Upstream requests that failed
    pub upstream_failures: u64,
    /// Lookups that joined an in-flight request instead of issuing one
    pub coalesced: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self, negative: bool) {
        self.hits += 1;
        if negative {
            self.negative_hits += 1;
        }
    }

    pub fn record_miss(&mut self, stale: bool) {
        self.misses += 1;
        if stale {
            self.stale_misses += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_upstream_request(&mut self) {
        self.upstream_requests += 1;
    }

    pub fn record_upstream_failure(&mut self) {
        self.upstream_failures += 1;
    }

    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
