//! Rate Limiting Module
//!
//! Keeps upstream traffic under the service's fair-use ceiling.

mod rate_limiter;

pub use rate_limiter::RateLimiter;
