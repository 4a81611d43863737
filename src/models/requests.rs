//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming query strings and bodies.

use serde::Deserialize;

use crate::catalog::{ListingQuery, ProductDraft};

/// Largest page size a client may ask for
pub const MAX_PAGE_SIZE: u32 = 100;

const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query string of GET /api/v1/products
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListingParams {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.limit {
            Some(0) => Some("limit must be greater than 0".to_string()),
            Some(limit) if limit > MAX_PAGE_SIZE => {
                Some(format!("limit must not exceed {}", MAX_PAGE_SIZE))
            }
            _ => None,
        }
    }

    pub fn into_query(self) -> ListingQuery {
        ListingQuery {
            keyword: self.keyword,
            category_id: self.category_id,
            page: self.page.unwrap_or(0),
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

/// Query string of GET /api/v1/products/by-ids, e.g. `ids=1,3,5`
#[derive(Debug, Clone, Deserialize)]
pub struct IdsParams {
    pub ids: String,
}

impl IdsParams {
    pub fn parse(&self) -> Result<Vec<i64>, String> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_| format!("'{}' is not a valid product id", part))
            })
            .collect()
    }
}

/// Body of POST /api/v1/products and PUT /api/v1/products/:id
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: f32,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub stock_quantity: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "categoryId", alias = "category_id")]
    pub category_id: i64,
}

impl ProductRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 {
            return Some("Title is required".to_string());
        }
        if !(3..=200).contains(&name_len) {
            return Some("Name must be between 3 and 200 characters".to_string());
        }
        if !(0.0..=10_000_000.0).contains(&self.price) {
            return Some("Price must be between 0 and 10,000,000".to_string());
        }
        None
    }
}

impl From<ProductRequest> for ProductDraft {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            price: req.price,
            thumbnail: req.thumbnail,
            quantity: req.quantity,
            stock_quantity: req.stock_quantity,
            description: req.description,
            category_id: req.category_id,
        }
    }
}

/// Body of PUT /api/v1/cache/policy
#[derive(Debug, Clone, Deserialize)]
pub struct CachePolicyRequest {
    pub enabled: bool,
}
