//! Catalog data model
//!
//! `Product` is the persistent record; `ProductResponse` is the projection
//! handed to clients and cached inside listing pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog item as stored by the persistent store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f32,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub stock_quantity: Option<i32>,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write-side input for creating or updating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
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
    #[serde(rename = "categoryId")]
    pub category_id: i64,
}

/// Client-facing projection of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f32,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
    pub stock_quantity: Option<i32>,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
            description: product.description.clone(),
            stock_quantity: product.stock_quantity,
            category_id: product.category_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// One page of a filtered listing, cached as a unit with its page count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<ProductResponse>,
    pub total_pages: u32,
}

/// Filter and paging parameters of a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Substring filter; `None` and `""` both mean "no filter"
    pub keyword: Option<String>,
    /// Category filter; `None` and `0` both mean "all categories"
    pub category_id: Option<i64>,
    /// Zero-based page number
    pub page: u32,
    /// Page size, always > 0
    pub limit: u32,
}

impl ListingQuery {
    pub fn new(keyword: impl Into<String>, category_id: i64, page: u32, limit: u32) -> Self {
        Self {
            keyword: Some(keyword.into()),
            category_id: Some(category_id),
            page,
            limit,
        }
    }

    /// Keyword with "absent" folded into "empty".
    pub fn keyword(&self) -> &str {
        self.keyword.as_deref().unwrap_or("")
    }

    /// Category with "absent" folded into the `0` sentinel.
    pub fn category(&self) -> i64 {
        self.category_id.unwrap_or(0).max(0)
    }
}
