//! Request and Response models for the catalog API
//!
//! DTOs used for serializing/deserializing HTTP query strings and bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CachePolicyRequest, IdsParams, ListingParams, ProductRequest};
pub use responses::{
    CachePolicyResponse, DeleteResponse, HealthResponse, ProductListResponse, StatsResponse,
};
