//! Product service: the catalog's read and write paths.
//!
//! Writes go to the persistent store first; only after a successful commit
//! does the service hand the mutation to the invalidator.

use std::sync::Arc;

use tracing::info;

use crate::cache::KeyValueStore;
use crate::catalog::generation::InvalidationGeneration;
use crate::catalog::invalidation::{CatalogMutation, Invalidator};
use crate::catalog::metrics::{CatalogCacheMetrics, MetricsSnapshot};
use crate::catalog::model::{ListingQuery, Product, ProductDraft, ProductPage};
use crate::catalog::policy::CachePolicy;
use crate::catalog::read_through::CatalogCache;
use crate::catalog::repository::ProductRepository;
use crate::catalog::settings::CacheSettings;
use crate::error::{CatalogError, Result};

pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
    cache: CatalogCache,
    invalidator: Invalidator,
    metrics: Arc<CatalogCacheMetrics>,
}

impl ProductService {
    /// Wires the read-through cache and the invalidator over one store and
    /// one policy.
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        store: Arc<dyn KeyValueStore>,
        policy: CachePolicy,
        settings: CacheSettings,
    ) -> Self {
        let metrics = Arc::new(CatalogCacheMetrics::new());
        let generation = InvalidationGeneration::new();
        let cache = CatalogCache::new(
            store.clone(),
            repository.clone(),
            policy.clone(),
            settings,
            metrics.clone(),
            generation.clone(),
        );
        let invalidator = Invalidator::new(store, policy, settings, metrics.clone(), generation);

        Self {
            repository,
            cache,
            invalidator,
            metrics,
        }
    }

    // == Reads ==
    pub async fn get_product(&self, id: i64) -> Result<Product> {
        self.cache.get_item(id).await
    }

    pub async fn list_products(&self, query: &ListingQuery) -> Result<ProductPage> {
        self.cache.get_listing(query).await
    }

    /// Bulk lookup straight from the persistent store.
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>> {
        self.repository.find_by_ids(ids).await
    }

    // == Writes ==
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product> {
        let product = self.repository.create(draft).await?;

        let report = self
            .invalidator
            .invalidate(CatalogMutation::Created { id: product.id })
            .await;
        info!(id = product.id, ?report, "product created");
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, draft: ProductDraft) -> Result<Product> {
        let product = self
            .repository
            .update(id, draft)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let report = self
            .invalidator
            .invalidate(CatalogMutation::Updated { id })
            .await;
        info!(id, ?report, "product updated");
        Ok(product)
    }

    /// Deletes a product.
    ///
    /// Deleting an absent product is not a silent no-op: it fails with
    /// `NotFound` (404 over HTTP) and triggers no invalidation, since nothing
    /// was committed.
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound(id));
        }

        let report = self
            .invalidator
            .invalidate(CatalogMutation::Deleted { id })
            .await;
        info!(id, ?report, "product deleted");
        Ok(())
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
