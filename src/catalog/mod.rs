//! Catalog Module
//!
//! Product reads through the cache, product writes with post-commit
//! invalidation, and the pieces they share: keys, policy, settings, metrics.

pub mod generation;
pub mod invalidation;
pub mod keys;
pub mod metrics;
pub mod model;
pub mod policy;
pub mod read_through;
pub mod repository;
pub mod service;
pub mod settings;

pub use generation::InvalidationGeneration;
pub use invalidation::{CatalogMutation, InvalidationReport, Invalidator};
pub use keys::{listing_key, listing_key_for, single_item_key, LISTING_NAMESPACE};
pub use metrics::{CatalogCacheMetrics, MetricsSnapshot};
pub use model::{ListingQuery, Product, ProductDraft, ProductPage, ProductResponse};
pub use policy::CachePolicy;
pub use read_through::CatalogCache;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use settings::CacheSettings;
