//! API Handlers
//!
//! HTTP request handlers for the catalog endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::{KeyValueStore, MemoryStore};
use crate::catalog::{
    CachePolicy, CacheSettings, InMemoryProductRepository, ProductRepository, ProductResponse,
    ProductService,
};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{
    CachePolicyRequest, CachePolicyResponse, DeleteResponse, HealthResponse, IdsParams,
    ListingParams, ProductListResponse, ProductRequest, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProductService>,
    /// The cache backend, shared with the service (for stats)
    pub store: Arc<dyn KeyValueStore>,
    /// The enablement flag, shared with the service
    pub policy: CachePolicy,
}

impl AppState {
    /// Builds the service over the given repository and cache store.
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        store: Arc<dyn KeyValueStore>,
        policy: CachePolicy,
        settings: CacheSettings,
    ) -> Self {
        let service = ProductService::new(repository, store.clone(), policy.clone(), settings);
        Self {
            service: Arc::new(service),
            store,
            policy,
        }
    }

    /// Creates state from configuration with the given cache store and the
    /// in-memory product repository.
    pub fn from_config(config: &Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::new()),
            store,
            CachePolicy::new(config.cache_enabled),
            CacheSettings::from_config(config),
        )
    }

    /// Fully in-memory state: memory store and memory repository.
    pub fn in_memory(config: &Config) -> Self {
        Self::from_config(config, Arc::new(MemoryStore::new(config.max_entries)))
    }
}

/// Handler for GET /api/v1/products
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ProductListResponse>> {
    if let Some(error_msg) = params.validate() {
        return Err(CatalogError::InvalidRequest(error_msg));
    }

    let query = params.into_query();
    tracing::debug!(
        keyword = query.keyword(),
        category_id = query.category(),
        page = query.page,
        limit = query.limit,
        "listing products"
    );

    let page = state.service.list_products(&query).await?;
    Ok(Json(page.into()))
}

/// Handler for GET /api/v1/products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>> {
    let product = state.service.get_product(id).await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// Handler for GET /api/v1/products/by-ids?ids=1,3,5
pub async fn products_by_ids_handler(
    State(state): State<AppState>,
    Query(params): Query<IdsParams>,
) -> Result<Json<Vec<ProductResponse>>> {
    let ids = params.parse().map_err(CatalogError::InvalidRequest)?;
    let products = state.service.find_by_ids(&ids).await?;
    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

/// Handler for POST /api/v1/products
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(CatalogError::InvalidRequest(error_msg));
    }

    let product = state.service.create_product(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

/// Handler for PUT /api/v1/products/:id
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CatalogError::InvalidRequest(error_msg));
    }

    let product = state.service.update_product(id, req.into()).await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// Handler for DELETE /api/v1/products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    state.service.delete_product(id).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /api/v1/cache/policy
pub async fn get_cache_policy_handler(State(state): State<AppState>) -> Json<CachePolicyResponse> {
    Json(CachePolicyResponse {
        enabled: state.policy.is_enabled(),
    })
}

/// Handler for PUT /api/v1/cache/policy
///
/// Takes effect on the next catalog call. Existing entries are kept.
pub async fn set_cache_policy_handler(
    State(state): State<AppState>,
    Json(req): Json<CachePolicyRequest>,
) -> Json<CachePolicyResponse> {
    let previous = state.policy.set_enabled(req.enabled);
    if previous != req.enabled {
        tracing::info!(enabled = req.enabled, "catalog cache policy changed");
    }
    Json(CachePolicyResponse {
        enabled: req.enabled,
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store_stats = match state.store.stats().await {
        Ok(stats) => Some(stats),
        Err(err) => {
            tracing::warn!(error = %err, "cache store statistics unavailable");
            None
        }
    };

    Json(StatsResponse::new(
        state.policy.is_enabled(),
        store_stats,
        state.service.metrics(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
