//! Tunables shared by the read-through cache and the invalidator.

use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::error::{CacheError, CacheResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// TTL in seconds for every catalog cache write
    pub default_ttl: u64,
    /// Upper bound on a single cache call
    pub op_timeout: Duration,
}

impl CacheSettings {
    pub fn new(default_ttl: u64, op_timeout: Duration) -> Self {
        Self {
            default_ttl,
            op_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_ttl, config.cache_op_timeout)
    }

    /// Runs a cache call, turning an overrun into `CacheError::Unavailable`.
    pub async fn bounded<T, F>(&self, call: F) -> CacheResult<T>
    where
        F: Future<Output = CacheResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Unavailable(format!(
                "no answer within {:?}",
                self.op_timeout
            ))),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
