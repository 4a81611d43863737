//! Cache Statistics Module
//!
//! Store-level counters: hits, misses, evictions and lazy expirations.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
    /// Entries dropped because their TTL had elapsed when touched
    pub expirations: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
