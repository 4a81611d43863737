//! Integration Tests for catalog cache consistency
//!
//! Drives `ProductService` end to end: reads through the cache, writes with
//! post-commit invalidation, policy toggling and an unreachable cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalog_cache::cache::{KeyValueStore, MemoryStore, UnreachableStore};
use catalog_cache::catalog::{
    listing_key, single_item_key, CachePolicy, CacheSettings, InMemoryProductRepository,
    ListingQuery, Product, ProductDraft, ProductRepository, ProductService,
};
use catalog_cache::error::{CatalogError, Result};

// == Helper Functions ==

fn draft(name: &str, category_id: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price: 10.0,
        description: Some(format!("{} description", name)),
        category_id,
        ..Default::default()
    }
}

struct Harness {
    service: ProductService,
    repository: Arc<InMemoryProductRepository>,
    store: Arc<dyn KeyValueStore>,
    policy: CachePolicy,
}

async fn harness_with(store: Arc<dyn KeyValueStore>, items: usize, ttl: u64) -> Harness {
    let repository = Arc::new(InMemoryProductRepository::new());
    for i in 0..items {
        repository
            .create(draft(&format!("Item {}", i), 1 + (i as i64 % 3)))
            .await
            .unwrap();
    }
    let policy = CachePolicy::new(true);
    let service = ProductService::new(
        repository.clone(),
        store.clone(),
        policy.clone(),
        CacheSettings::new(ttl, Duration::from_millis(200)),
    );
    Harness {
        service,
        repository,
        store,
        policy,
    }
}

async fn harness(items: usize) -> Harness {
    harness_with(Arc::new(MemoryStore::new(1000)), items, 60).await
}

// == Read-through ==

#[tokio::test]
async fn test_cached_and_recomputed_items_agree() {
    let h = harness(5).await;

    let from_store = h.service.get_product(3).await.unwrap();
    let from_cache = h.service.get_product(3).await.unwrap();
    assert_eq!(from_store, from_cache);

    // Drop the entry behind the service's back: recomputation gives the same item
    h.store.delete(&single_item_key(3)).await.unwrap();
    let recomputed = h.service.get_product(3).await.unwrap();
    assert_eq!(recomputed, from_cache);

    let metrics = h.service.metrics();
    assert_eq!(metrics.hits, 1);
    assert_eq!(metrics.misses, 2);
}

// == Invalidation completeness ==

#[tokio::test]
async fn test_update_scenario_returns_new_data() {
    let h = harness(50).await;

    let a = h.service.get_product(42).await.unwrap();
    assert_eq!(a.name, "Item 41");
    assert!(h.store.exists(&single_item_key(42)).await.unwrap());

    h.service
        .update_product(42, draft("Item 41 v2", 2))
        .await
        .unwrap();
    assert!(!h.store.exists(&single_item_key(42)).await.unwrap());

    let b = h.service.get_product(42).await.unwrap();
    assert_eq!(b.name, "Item 41 v2");
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_delete_makes_item_not_found() {
    let h = harness(3).await;
    h.service.get_product(2).await.unwrap();

    h.service.delete_product(2).await.unwrap();

    assert!(matches!(
        h.service.get_product(2).await,
        Err(CatalogError::NotFound(2))
    ));
}

/// Repository whose single-item reads take their snapshot, then stall.
struct StallingRepository {
    inner: InMemoryProductRepository,
    stall: Duration,
}

#[async_trait]
impl ProductRepository for StallingRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let snapshot = self.inner.find_by_id(id).await;
        tokio::time::sleep(self.stall).await;
        snapshot
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>> {
        self.inner.find_by_ids(ids).await
    }

    async fn search_paged(&self, query: &ListingQuery) -> Result<(Vec<Product>, u32)> {
        self.inner.search_paged(query).await
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product> {
        self.inner.create(draft).await
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> Result<Option<Product>> {
        self.inner.update(id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_read_overlapping_update_does_not_repopulate_old_version() {
    let repository = Arc::new(StallingRepository {
        inner: InMemoryProductRepository::new(),
        stall: Duration::from_millis(150),
    });
    repository.create(draft("A", 1)).await.unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new(100));
    let service = Arc::new(ProductService::new(
        repository,
        store.clone(),
        CachePolicy::new(true),
        CacheSettings::new(60, Duration::from_millis(100)),
    ));

    let reader = {
        let service = service.clone();
        tokio::spawn(async move { service.get_product(1).await })
    };

    // Commit and invalidate while the reader holds its old snapshot
    tokio::time::sleep(Duration::from_millis(30)).await;
    service.update_product(1, draft("B", 1)).await.unwrap();

    assert_eq!(reader.await.unwrap().unwrap().name, "A");
    assert!(!store.exists(&single_item_key(1)).await.unwrap());
    assert_eq!(service.get_product(1).await.unwrap().name, "B");
    assert_eq!(service.metrics().stale_writes_dropped, 1);
}

// == Listing staleness bound ==

#[tokio::test]
async fn test_create_scenario_refreshes_listing() {
    let h = harness(23).await;
    let query = ListingQuery::new("", 0, 0, 10);

    let before = h.service.list_products(&query).await.unwrap();
    assert_eq!(before.total_pages, 3);
    assert!(h.store.exists(&listing_key(Some(""), Some(0), 0, 10)).await.unwrap());

    h.service.create_product(draft("Item 23", 1)).await.unwrap();
    assert!(!h.store.exists(&listing_key(Some(""), Some(0), 0, 10)).await.unwrap());

    let last_page = h
        .service
        .list_products(&ListingQuery::new("", 0, 2, 10))
        .await
        .unwrap();
    assert_eq!(last_page.products.len(), 4);
    assert_eq!(last_page.total_pages, 3);
}

#[tokio::test]
async fn test_any_mutation_evicts_every_listing() {
    let h = harness(12).await;
    let queries = [
        ListingQuery::new("", 0, 0, 5),
        ListingQuery::new("item 1", 0, 0, 5),
        ListingQuery::new("", 2, 1, 2),
    ];
    for q in &queries {
        h.service.list_products(q).await.unwrap();
    }

    h.service.update_product(1, draft("Renamed", 3)).await.unwrap();

    for q in &queries {
        let key = listing_key(q.keyword.as_deref(), q.category_id, q.page, q.limit);
        assert!(!h.store.exists(&key).await.unwrap(), "{} survived", key);
    }

    // Keyword filter now sees the rename
    let renamed = h
        .service
        .list_products(&ListingQuery::new("renamed", 0, 0, 5))
        .await
        .unwrap();
    assert_eq!(renamed.products.len(), 1);
    assert_eq!(renamed.products[0].id, 1);
}

#[tokio::test]
async fn test_listing_page_count_survives_cache_hit() {
    let h = harness(23).await;
    let query = ListingQuery::new("", 0, 1, 10);

    let fresh = h.service.list_products(&query).await.unwrap();
    let cached = h.service.list_products(&query).await.unwrap();

    assert_eq!(cached.total_pages, 3);
    assert_eq!(cached.products.len(), 10);
    assert_eq!(fresh, cached);
}

// == Fail-open ==

#[tokio::test]
async fn test_unreachable_cache_is_invisible_to_callers() {
    let h = harness_with(Arc::new(UnreachableStore), 23, 60).await;

    let item = h.service.get_product(7).await.unwrap();
    assert_eq!(item.id, 7);

    let page = h
        .service
        .list_products(&ListingQuery::new("", 0, 0, 10))
        .await
        .unwrap();
    assert_eq!(page.products.len(), 10);
    assert_eq!(page.total_pages, 3);

    let created = h.service.create_product(draft("Late arrival", 1)).await.unwrap();
    assert_eq!(h.repository.len().await, 24);
    assert_eq!(h.service.get_product(created.id).await.unwrap().name, "Late arrival");

    assert!(h.service.metrics().fail_open > 0);
}

// == Policy ==

#[tokio::test]
async fn test_disabled_policy_passes_through() {
    let h = harness(4).await;
    h.policy.set_enabled(false);

    h.service.get_product(1).await.unwrap();
    h.service
        .list_products(&ListingQuery::new("", 0, 0, 10))
        .await
        .unwrap();

    assert_eq!(h.store.stats().await.unwrap().total_entries, 0);
}

#[tokio::test]
async fn test_toggle_applies_on_next_call() {
    let h = harness(4).await;

    h.service.get_product(1).await.unwrap();
    h.policy.set_enabled(false);

    // While off, writes do not evict: the stale entry is left alone
    h.service.update_product(1, draft("Changed", 1)).await.unwrap();
    assert!(h.store.exists(&single_item_key(1)).await.unwrap());
    assert_eq!(h.service.get_product(1).await.unwrap().name, "Changed");

    h.policy.set_enabled(true);
    assert!(h.service.get_product(1).await.is_ok());
    assert_eq!(h.service.metrics().hits, 1);
}

// == TTL ==

#[tokio::test]
async fn test_entries_expire_after_ttl() {
    let h = harness_with(Arc::new(MemoryStore::new(100)), 2, 1).await;

    h.service.get_product(1).await.unwrap();
    assert!(h.store.exists(&single_item_key(1)).await.unwrap());

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert!(!h.store.exists(&single_item_key(1)).await.unwrap());
    h.service.get_product(1).await.unwrap();
    assert_eq!(h.service.metrics().misses, 2);
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_converge() {
    let h = Arc::new(harness(10).await);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let h = h.clone();
        handles.push(tokio::spawn(async move {
            h.service.get_product(5).await.unwrap()
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert!(h.store.exists(&single_item_key(5)).await.unwrap());
}
