//! Resolver Module
//!
//! The public entry point: coordinates in, locality (or negative marker) out.

mod geocode_cache;

pub use geocode_cache::GeocodeCache;
