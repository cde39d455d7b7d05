//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and lazy TTL expiry.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheKey, CacheStats, LruTracker};
use crate::types::{CachedResolution, Resolution};

// == Lookup ==
/// Result of consulting the store for a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Fresh entry; recency has been updated
    Fresh(Resolution),
    /// Entry exists but its freshness window has passed
    Stale,
    /// No entry for the key
    Missing,
}

// == Cache Store ==
/// Bounded key-value storage with LRU eviction and lazy expiry.
///
/// Stale entries stay in place until refreshed or evicted. Every method takes
/// the current instant so callers control the clock.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker<CacheKey>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Freshness window
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity + 1),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            ttl,
        }
    }

    // == Lookup ==
    /// Consults the store, recording a hit or miss.
    ///
    /// A fresh hit moves the key to most recently used. A stale entry is
    /// reported but neither removed nor touched.
    pub fn lookup(&mut self, key: &CacheKey, now: Instant) -> Lookup {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl, now) => {
                let value = entry.value.clone();
                self.stats.record_hit(matches!(value, Resolution::NotFound));
                self.lru.touch(*key);
                Lookup::Fresh(value)
            }
            Some(_) => {
                self.stats.record_miss(true);
                Lookup::Stale
            }
            None => {
                self.stats.record_miss(false);
                Lookup::Missing
            }
        }
    }

    // == Insert ==
    /// Stores a value for the key, replacing any previous entry.
    ///
    /// The key becomes most recently used. If the store then holds more than
    /// `capacity` entries, the least recently used one is evicted and returned.
    pub fn insert(&mut self, key: CacheKey, value: Resolution, now: Instant) -> Option<CacheKey> {
        self.entries.insert(key, CacheEntry::new(value, now));
        self.lru.touch(key);

        let evicted = if self.entries.len() > self.capacity {
            self.lru.evict_oldest().map(|oldest| {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                oldest
            })
        } else {
            None
        };

        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == Peek ==
    /// Returns the stored value regardless of freshness.
    ///
    /// Does not affect recency or statistics.
    pub fn peek(&self, key: &CacheKey, now: Instant) -> Option<CachedResolution> {
        self.entries.get(key).map(|entry| CachedResolution {
            value: entry.value.clone(),
            fresh: entry.is_fresh(self.ttl, now),
            age: entry.age(now),
        })
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub fn keys_by_recency(&self) -> Vec<CacheKey> {
        self.lru.iter().copied().collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Mutable access for counters recorded outside the store.
    pub fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }

    // == Length ==
    /// Returns the current number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
