//! In-Memory Store Module
//!
//! HashMap storage with lazy TTL expiry and LRU eviction at capacity.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats, KeyValueStore, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{CacheError, CacheResult};

#[derive(Debug, Default)]
struct Inner {
    entries: std::collections::HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
}

impl Inner {
    /// Returns the live entry for `key`, dropping it first if it has expired.
    fn live_entry(&mut self, key: &str) -> Option<&mut CacheEntry> {
        let expired = self.entries.get(key).map(CacheEntry::is_expired)?;
        if expired {
            self.remove(key);
            self.stats.record_expiration();
            return None;
        }
        self.entries.get_mut(key)
    }

    fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }
}

// == Memory Store ==
/// Process-local key-value store.
///
/// Expiry is enforced on access only; an expired entry occupies memory until
/// it is touched or evicted for capacity.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl MemoryStore {
    /// Creates a store holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_entries: max_entries.max(1),
        }
    }

    /// Returns the current number of entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> CacheResult<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::Rejected(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::Rejected(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let mut inner = self.inner.write().await;

        if !inner.entries.contains_key(key) && inner.entries.len() >= self.max_entries {
            if let Some(evicted) = inner.lru.evict_oldest() {
                inner.entries.remove(&evicted);
                inner.stats.record_eviction();
            }
        }

        inner.entries.insert(key.to_string(), CacheEntry::new(value, ttl_seconds));
        inner.lru.touch(key);
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);

        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut inner = self.inner.write().await;

        let value = inner.live_entry(key).map(|entry| entry.value.clone());
        match value {
            Some(value) => {
                inner.lru.touch(key);
                inner.stats.record_hit();
                Ok(Some(value))
            }
            None => {
                inner.stats.record_miss();
                Ok(None)
            }
        }
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.inner.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        Ok(self.inner.write().await.live_entry(key).is_some())
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> CacheResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.live_entry(key) {
            Some(entry) => {
                entry.reset_ttl(ttl_seconds);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl_remaining(&self, key: &str) -> CacheResult<Option<u64>> {
        let mut inner = self.inner.write().await;
        Ok(inner.live_entry(key).map(|entry| entry.ttl_remaining()))
    }

    async fn delete_prefix(&self, prefix: &str) -> CacheResult<usize> {
        let mut inner = self.inner.write().await;

        let doomed: Vec<String> = inner
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();

        for key in &doomed {
            inner.remove(key);
        }

        Ok(doomed.len())
    }

    async fn clear(&self) -> CacheResult<()> {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.lru.clear();
        inner.stats.set_total_entries(0);
        Ok(())
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        Ok(stats)
    }
}
