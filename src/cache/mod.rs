//! Cache Module
//!
//! Provides bounded in-memory storage of resolved localities with lazy TTL
//! expiry and LRU eviction.

mod entry;
mod key;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{validate_coordinates, CacheKey};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::{CacheStore, Lookup};
