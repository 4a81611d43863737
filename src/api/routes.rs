//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_product_handler, delete_product_handler, get_cache_policy_handler,
    get_product_handler, health_handler, list_products_handler, products_by_ids_handler,
    set_cache_policy_handler, stats_handler, update_product_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET    /api/v1/products` - Filtered, paged listing
/// - `POST   /api/v1/products` - Create a product
/// - `GET    /api/v1/products/by-ids` - Bulk lookup
/// - `GET    /api/v1/products/:id` - Single product
/// - `PUT    /api/v1/products/:id` - Update a product
/// - `DELETE /api/v1/products/:id` - Delete a product
/// - `GET|PUT /api/v1/cache/policy` - Read or toggle the cache policy
/// - `GET    /stats` - Cache statistics
/// - `GET    /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/v1/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route("/api/v1/products/by-ids", get(products_by_ids_handler))
        .route(
            "/api/v1/products/:id",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .route(
            "/api/v1/cache/policy",
            get(get_cache_policy_handler).put(set_cache_policy_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::in_memory(&Config::default()))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_listing_endpoint_empty_catalog() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/products?keyword=&category_id=0&page=0&limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_listing_rejects_zero_limit() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/products?limit=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/products/12345")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/products")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Teapot","price":25.0,"categoryId":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
