//! API Module
//!
//! HTTP handlers and routing for the locality cache service.
//!
//! # Endpoints
//! - `GET /resolve` - Resolve coordinates to a locality
//! - `GET /loading` - In-flight state for coordinates
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
