//! Persistent store interface for products.
//!
//! The catalog treats the store as the system of record and only talks to it
//! through `ProductRepository`. `InMemoryProductRepository` is the reference
//! implementation the service binary runs with.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::catalog::model::{ListingQuery, Product, ProductDraft};
use crate::error::Result;

// == Product Repository ==
/// Each call is its own transaction; a returned `Ok` means committed.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;

    /// Products for the given ids, ascending by id. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>>;

    /// One page of matching products, ascending by id, plus the total page count.
    async fn search_paged(&self, query: &ListingQuery) -> Result<(Vec<Product>, u32)>;

    async fn create(&self, draft: ProductDraft) -> Result<Product>;

    /// Applies `draft` to an existing product. `Ok(None)` if absent.
    async fn update(&self, id: i64, draft: ProductDraft) -> Result<Option<Product>>;

    /// Returns whether a product was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

// == In-Memory Repository ==
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

fn matches(product: &Product, keyword: &str, category: i64) -> bool {
    if category != 0 && product.category_id != category {
        return false;
    }
    if keyword.is_empty() {
        return true;
    }
    let needle = keyword.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>> {
        let table = self.table.read().await;
        let mut found: Vec<Product> = ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect();
        found.sort_by_key(|p| p.id);
        found.dedup_by_key(|p| p.id);
        Ok(found)
    }

    async fn search_paged(&self, query: &ListingQuery) -> Result<(Vec<Product>, u32)> {
        let table = self.table.read().await;
        let keyword = query.keyword();
        let category = query.category();
        let limit = query.limit.max(1) as usize;

        let matching: Vec<&Product> = table
            .rows
            .values()
            .filter(|p| matches(p, keyword, category))
            .collect();

        let total_pages = matching.len().div_ceil(limit) as u32;
        let page = matching
            .into_iter()
            .skip(query.page as usize * limit)
            .take(limit)
            .cloned()
            .collect();

        Ok((page, total_pages))
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let now = Utc::now();
        let product = Product {
            id: table.last_id,
            name: draft.name,
            price: draft.price,
            thumbnail: draft.thumbnail,
            description: draft.description,
            quantity: draft.quantity,
            stock_quantity: draft.stock_quantity,
            category_id: draft.category_id,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(product.id, product.clone());

        Ok(product)
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> Result<Option<Product>> {
        let mut table = self.table.write().await;
        let Some(product) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        product.name = draft.name;
        product.price = draft.price;
        product.category_id = draft.category_id;
        product.quantity = draft.quantity;
        product.stock_quantity = draft.stock_quantity;
        product.description = draft.description;
        // An empty thumbnail keeps the current one
        if let Some(thumbnail) = draft.thumbnail.filter(|t| !t.is_empty()) {
            product.thumbnail = Some(thumbnail);
        }
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
