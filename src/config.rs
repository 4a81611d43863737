//! Configuration Module
//!
//! Handles loading service configuration from environment variables.

use std::env;
use std::time::Duration;

/// Which key-value backend the catalog cache talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    /// In-process store
    Memory,
    /// Redis server (requires the `redis` feature)
    Redis { url: String },
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial state of the cache-enablement policy
    pub cache_enabled: bool,
    /// TTL in seconds applied to every catalog cache write
    pub default_ttl: u64,
    /// Maximum number of entries the in-memory store can hold
    pub max_entries: usize,
    /// Upper bound on a single cache call before it counts as unavailable
    pub cache_op_timeout: Duration,
    /// Cache backend selection
    pub backend: CacheBackend,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - Cache-enablement policy at startup (default: true)
    /// - `CACHE_DEFAULT_TTL` - TTL in seconds for cache writes (default: 300)
    /// - `CACHE_MAX_ENTRIES` - In-memory store capacity (default: 10000)
    /// - `CACHE_OP_TIMEOUT_MS` - Cache call timeout in milliseconds (default: 100)
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis URL when the backend is `redis` (default: redis://127.0.0.1:6379)
    /// - `SERVER_PORT` - HTTP server port (default: 8088)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend = match env::var("CACHE_BACKEND").ok().as_deref() {
            Some("redis") => CacheBackend::Redis {
                url: env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            },
            _ => CacheBackend::Memory,
        };

        Self {
            cache_enabled: env::var("CACHE_ENABLED")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.cache_enabled),
            default_ttl: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.default_ttl),
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            cache_op_timeout: env::var("CACHE_OP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.cache_op_timeout),
            backend,
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            default_ttl: 300,
            max_entries: 10_000,
            cache_op_timeout: Duration::from_millis(100),
            backend: CacheBackend::Memory,
            server_port: 8088,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
