//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::catalog::{MetricsSnapshot, ProductPage, ProductResponse};

/// Response body for GET /api/v1/products
#[derive(Debug, Clone, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

impl From<ProductPage> for ProductListResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            products: page.products,
            total_pages: page.total_pages,
        }
    }
}

/// Response body for DELETE /api/v1/products/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: i64,
}

impl DeleteResponse {
    pub fn new(id: i64) -> Self {
        Self {
            message: format!("Product with id = {} deleted successfully", id),
            id,
        }
    }
}

/// Response body for GET/PUT /api/v1/cache/policy
#[derive(Debug, Clone, Serialize)]
pub struct CachePolicyResponse {
    pub enabled: bool,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current cache-enablement policy
    pub cache_enabled: bool,
    /// Backend statistics, absent while the store is unreachable
    pub store: Option<CacheStats>,
    /// Backend hit rate (hits / (hits + misses))
    pub store_hit_rate: Option<f64>,
    /// What the catalog layer did with the cache
    pub catalog: MetricsSnapshot,
}

impl StatsResponse {
    pub fn new(cache_enabled: bool, store: Option<CacheStats>, catalog: MetricsSnapshot) -> Self {
        Self {
            cache_enabled,
            store_hit_rate: store.as_ref().map(CacheStats::hit_rate),
            store,
            catalog,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
