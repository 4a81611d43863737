//! Cache Module
//!
//! Generic TTL key-value store abstraction. Knows nothing about the catalog.

mod backend;
mod entry;
mod lru;
mod memory;
#[cfg(feature = "redis")]
mod redis;
mod stats;
mod unreachable;


use async_trait::async_trait;

use crate::error::CacheResult;

// Re-export public types
pub use backend::connect_store;
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;
pub use stats::CacheStats;
pub use unreachable::UnreachableStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Key-Value Store ==
/// TTL-bounded key-value storage.
///
/// Contract shared by every backend:
/// - `get` on an absent or expired key is `Ok(None)`, never an error
/// - `delete` on an absent key succeeds
/// - `set` overwrites and restarts the expiry clock with the given TTL
/// - an unreachable backend fails every call with `CacheError::Unavailable`
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stores `value` under `key` for `ttl_seconds`.
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> CacheResult<()>;

    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// True if a live (non-expired) entry exists.
    async fn exists(&self, key: &str) -> CacheResult<bool>;

    /// Restarts the expiry clock of a live entry. Returns false if absent.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> CacheResult<bool>;

    /// Remaining TTL in seconds, `None` if the key is absent.
    async fn ttl_remaining(&self, key: &str) -> CacheResult<Option<u64>>;

    /// Deletes every key starting with `prefix`, returning how many went.
    async fn delete_prefix(&self, prefix: &str) -> CacheResult<usize>;

    /// Drops every entry.
    async fn clear(&self) -> CacheResult<()>;

    async fn stats(&self) -> CacheResult<CacheStats>;
}
