//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `/api/v1/products` - Listing (cached) and creation
//! - `/api/v1/products/:id` - Single product (cached), update, delete
//! - `/api/v1/products/by-ids` - Bulk lookup
//! - `/api/v1/cache/policy` - Cache-enablement toggle
//! - `/stats`, `/health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
