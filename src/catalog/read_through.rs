//! Read-through cache for catalog reads.
//!
//! Reads consult the key-value store first and fall back to the persistent
//! store on a miss, then populate the cache. Every cache failure (backend
//! down, timeout, undecodable payload, rejected write) degrades to a plain
//! persistent-store read; only `NotFound` and storage errors reach callers.
//!
//! Concurrent misses on one key are not coalesced: each queries the
//! persistent store and writes the cache, and the last write wins.
//!
//! A miss that overlaps an invalidation must not leave its value behind, since
//! the load may have seen the catalog before the committed write. Each
//! populating read samples the [`InvalidationGeneration`] before loading. It
//! skips the write if the generation moved during the load, and evicts its
//! own write if the generation moved while the write was in flight.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::KeyValueStore;
use crate::catalog::generation::InvalidationGeneration;
use crate::catalog::keys::{listing_key_for, single_item_key};
use crate::catalog::metrics::CatalogCacheMetrics;
use crate::catalog::model::{ListingQuery, Product, ProductPage, ProductResponse};
use crate::catalog::policy::CachePolicy;
use crate::catalog::repository::ProductRepository;
use crate::catalog::settings::CacheSettings;
use crate::error::{CacheError, CatalogError, Result};

// == Catalog Cache ==
#[derive(Clone)]
pub struct CatalogCache {
    store: Arc<dyn KeyValueStore>,
    repository: Arc<dyn ProductRepository>,
    policy: CachePolicy,
    settings: CacheSettings,
    metrics: Arc<CatalogCacheMetrics>,
    generation: InvalidationGeneration,
}

impl CatalogCache {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        repository: Arc<dyn ProductRepository>,
        policy: CachePolicy,
        settings: CacheSettings,
        metrics: Arc<CatalogCacheMetrics>,
        generation: InvalidationGeneration,
    ) -> Self {
        Self {
            store,
            repository,
            policy,
            settings,
            metrics,
            generation,
        }
    }

    // == Get Item ==
    /// Returns one product, from the cache when possible.
    ///
    /// Absent products fail with `NotFound` and are not cached.
    pub async fn get_item(&self, id: i64) -> Result<Product> {
        if !self.policy.is_enabled() {
            self.metrics.record_bypass();
            return self.load_item(id).await;
        }

        let key = single_item_key(id);
        if let Some(product) = self.read_cached::<Product>(&key).await {
            return Ok(product);
        }

        let generation = self.generation.current();
        let product = self.load_item(id).await?;
        self.populate(&key, &product, generation).await;
        Ok(product)
    }

    // == Get Listing ==
    /// Returns one page of a filtered listing together with its page count.
    ///
    /// Product order is the persistent store's (ascending id), kept as-is.
    pub async fn get_listing(&self, query: &ListingQuery) -> Result<ProductPage> {
        if query.limit == 0 {
            return Err(CatalogError::InvalidRequest(
                "limit must be greater than 0".to_string(),
            ));
        }

        if !self.policy.is_enabled() {
            self.metrics.record_bypass();
            return self.load_listing(query).await;
        }

        let key = listing_key_for(query);
        if let Some(page) = self.read_cached::<ProductPage>(&key).await {
            return Ok(page);
        }

        let generation = self.generation.current();
        let page = self.load_listing(query).await?;
        self.populate(&key, &page, generation).await;
        Ok(page)
    }

    async fn load_item(&self, id: i64) -> Result<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    async fn load_listing(&self, query: &ListingQuery) -> Result<ProductPage> {
        let (products, total_pages) = self.repository.search_paged(query).await?;
        Ok(ProductPage {
            products: products.iter().map(ProductResponse::from).collect(),
            total_pages,
        })
    }

    /// Cache lookup that never fails: anything but a decodable hit is `None`.
    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.settings.bounded(self.store.get(key)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "catalog cache miss");
                self.metrics.record_miss();
                return None;
            }
            Err(err) => {
                warn!(key, error = %err, "cache read failed, falling back to persistent store");
                self.metrics.record_fail_open();
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "catalog cache hit");
                self.metrics.record_hit();
                Some(value)
            }
            Err(err) => {
                warn!(key, error = %err, "discarding undecodable cache entry");
                self.metrics.record_serialization_failure();
                None
            }
        }
    }

    /// Caches a value loaded under `generation`, unless an invalidation has
    /// run since.
    async fn populate<T: Serialize>(&self, key: &str, value: &T, generation: u64) {
        if self.generation.current() != generation {
            debug!(key, "invalidation overlapped the load, not caching");
            self.metrics.record_stale_write_dropped();
            return;
        }

        if !self.write_cached(key, value).await {
            return;
        }

        // The invalidator may have evicted between the check above and the write.
        if self.generation.current() != generation {
            debug!(key, "invalidation overlapped the write, evicting it");
            self.metrics.record_stale_write_dropped();
            if let Err(err) = self.settings.bounded(self.store.delete(key)).await {
                warn!(key, error = %err, "failed to evict overlapped write, it stays until TTL expiry");
                self.metrics.record_fail_open();
            }
        }
    }

    /// Best-effort cache write; failures are logged and counted only.
    async fn write_cached<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let outcome = match serde_json::to_string(value) {
            Ok(payload) => {
                self.settings
                    .bounded(self.store.set(key, payload, self.settings.default_ttl))
                    .await
            }
            Err(err) => Err(CacheError::from(err)),
        };

        match outcome {
            Ok(()) => true,
            Err(CacheError::Serialization(err)) => {
                warn!(key, error = %err, "could not encode value for cache");
                self.metrics.record_serialization_failure();
                false
            }
            Err(err) => {
                warn!(key, error = %err, "cache write skipped");
                self.metrics.record_fail_open();
                false
            }
        }
    }
}
