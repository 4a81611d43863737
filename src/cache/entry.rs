//! Cache Entry Module
//!
//! A stored payload plus its expiry deadline.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cache entry. Every entry expires; there is no "forever".
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized payload
    pub value: String,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl_seconds` from now.
    pub fn new(value: String, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: deadline(current_timestamp_ms(), ttl_seconds),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches `expires_at`.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Reset Expiry ==
    /// Restarts the expiry clock with a new TTL, keeping the value.
    pub fn reset_ttl(&mut self, ttl_seconds: u64) {
        self.expires_at = deadline(current_timestamp_ms(), ttl_seconds);
    }

    /// Remaining TTL in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }

    /// Remaining TTL in whole seconds, rounded up so a live entry never reports 0.
    pub fn ttl_remaining(&self) -> u64 {
        self.ttl_remaining_ms().div_ceil(1000)
    }
}

fn deadline(now_ms: u64, ttl_seconds: u64) -> u64 {
    now_ms.saturating_add(ttl_seconds.saturating_mul(1000))
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
