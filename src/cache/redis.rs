//! Redis-backed store
//!
//! Requires the `redis` feature. Expiry is delegated to Redis, which also
//! evicts lazily (plus its own sampling), matching the in-memory contract.

use ::redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError};
use async_trait::async_trait;

use crate::cache::{CacheStats, KeyValueStore};
use crate::error::{CacheError, CacheResult};

/// Prefix applied to every key this service writes.
const KEY_PREFIX: &str = "catalog:";

fn unavailable(err: RedisError) -> CacheError {
    CacheError::Unavailable(format!("redis: {}", err))
}

/// Escapes glob metacharacters so a literal prefix can be used with `KEYS`.
fn glob_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Connects to the Redis server at `url`.
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(unavailable)?;
        Ok(Self { conn })
    }

    fn prefixed(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }

    async fn matching_keys(&self, prefix: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}*", glob_escape(&Self::prefixed(prefix)));
        conn.keys(pattern).await.map_err(unavailable)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::prefixed(key), value, ttl_seconds.max(1))
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(Self::prefixed(key)).await.map_err(unavailable)
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn.del(Self::prefixed(key)).await.map_err(unavailable)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.conn.clone();
        conn.exists(Self::prefixed(key)).await.map_err(unavailable)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> CacheResult<bool> {
        let mut conn = self.conn.clone();
        let seconds = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        conn.expire(Self::prefixed(key), seconds)
            .await
            .map_err(unavailable)
    }

    async fn ttl_remaining(&self, key: &str) -> CacheResult<Option<u64>> {
        let mut conn = self.conn.clone();
        let ttl: i64 = conn.ttl(Self::prefixed(key)).await.map_err(unavailable)?;
        // -2: no such key, -1: key without expiry (never written by us)
        Ok(match ttl {
            -2 => None,
            t if t < 0 => Some(0),
            t => Some(t as u64),
        })
    }

    async fn delete_prefix(&self, prefix: &str) -> CacheResult<usize> {
        let keys = self.matching_keys(prefix).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(keys).await.map_err(unavailable)?;
        Ok(deleted.max(0) as usize)
    }

    async fn clear(&self) -> CacheResult<()> {
        self.delete_prefix("").await.map(|_| ())
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        let keys = self.matching_keys("").await?;
        let mut stats = CacheStats::new();
        stats.set_total_entries(keys.len());
        Ok(stats)
    }
}
