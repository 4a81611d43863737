//! Catalog Cache - product catalog service with a read-through cache
//!
//! Product reads are served from a TTL key-value cache when possible and from
//! the persistent store otherwise; product writes invalidate what they made
//! stale once committed.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use config::Config;
