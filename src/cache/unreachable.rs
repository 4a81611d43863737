//! A store that is never there.
//!
//! Stands in for a cache service that cannot be reached, so the catalog can
//! run (and be exercised) with its cache physically offline.

use async_trait::async_trait;

use crate::cache::{CacheStats, KeyValueStore};
use crate::error::{CacheError, CacheResult};

/// Every operation fails with `CacheError::Unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnreachableStore;

fn down<T>() -> CacheResult<T> {
    Err(CacheError::Unavailable("cache store unreachable".to_string()))
}

#[async_trait]
impl KeyValueStore for UnreachableStore {
    async fn set(&self, _key: &str, _value: String, _ttl_seconds: u64) -> CacheResult<()> {
        down()
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        down()
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        down()
    }

    async fn exists(&self, _key: &str) -> CacheResult<bool> {
        down()
    }

    async fn expire(&self, _key: &str, _ttl_seconds: u64) -> CacheResult<bool> {
        down()
    }

    async fn ttl_remaining(&self, _key: &str) -> CacheResult<Option<u64>> {
        down()
    }

    async fn delete_prefix(&self, _prefix: &str) -> CacheResult<usize> {
        down()
    }

    async fn clear(&self) -> CacheResult<()> {
        down()
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        down()
    }
}
