//! Backend Selection
//!
//! Builds the store named by configuration. A cache backend that cannot be
//! reached at startup never keeps the service from starting.

use std::sync::Arc;
#[cfg(feature = "redis")]
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::{KeyValueStore, MemoryStore};
use crate::config::{CacheBackend, Config};

/// Lower bound on the time allowed to open a backend connection
#[cfg(feature = "redis")]
pub const MIN_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

// == Connect Store ==
/// Returns the configured backend, or an in-memory store when that backend
/// is unavailable.
pub async fn connect_store(config: &Config) -> Arc<dyn KeyValueStore> {
    match &config.backend {
        CacheBackend::Memory => {
            info!("Using in-memory cache store");
            Arc::new(MemoryStore::new(config.max_entries))
        }
        #[cfg(feature = "redis")]
        CacheBackend::Redis { url } => {
            let timeout = config.cache_op_timeout.max(MIN_CONNECT_TIMEOUT);
            match tokio::time::timeout(timeout, crate::cache::RedisStore::connect(url)).await {
                Ok(Ok(store)) => {
                    info!("Using redis cache store at {}", url);
                    Arc::new(store)
                }
                Ok(Err(err)) => {
                    warn!(error = %err, "redis at {} unavailable, using in-memory store", url);
                    Arc::new(MemoryStore::new(config.max_entries))
                }
                Err(_) => {
                    warn!("redis at {} did not answer within {:?}, using in-memory store", url, timeout);
                    Arc::new(MemoryStore::new(config.max_entries))
                }
            }
        }
        #[cfg(not(feature = "redis"))]
        CacheBackend::Redis { url } => {
            warn!(
                "CACHE_BACKEND=redis ({}) requires the `redis` feature, using in-memory store",
                url
            );
            Arc::new(MemoryStore::new(config.max_entries))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn assert_usable(store: Arc<dyn KeyValueStore>) {
        store.set("product:1", "{}".to_string(), 60).await.unwrap();
        assert_eq!(store.get("product:1").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let store = connect_store(&Config::default()).await;
        assert_usable(store).await;
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_memory() {
        let config = Config {
            backend: CacheBackend::Redis {
                url: "redis://127.0.0.1:1".to_string(),
            },
            ..Config::default()
        };

        let store = connect_store(&config).await;
        assert_usable(store).await;
    }
}
