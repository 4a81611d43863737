//! Error types for the catalog service
//!
//! Two layers: `CatalogError` reaches callers and HTTP clients, `CacheError`
//! stays inside the cache layer and is absorbed there (fail-open).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Errors surfaced by catalog reads and writes.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product absent from the persistent store
    #[error("Product not found: {0}")]
    NotFound(i64),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Persistent store failure
    #[error("Storage error: {0}")]
    Storage(String),
}

// == Cache Error Enum ==
/// Failures of the key-value cache store.
///
/// None of these leave the cache layer: the read path falls back to the
/// persistent store and the write path logs and carries on.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend unreachable or did not answer in time
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Payload could not be encoded or decoded
    #[error("Cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key or value refused by the store (size limits)
    #[error("Cache write rejected: {0}")]
    Rejected(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type for cache store operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
