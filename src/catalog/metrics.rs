//! Catalog cache counters.
//!
//! Store statistics say what the backend saw; these say what the catalog
//! layer did with it, including the failures it absorbed.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct CatalogCacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    bypassed: AtomicU64,
    fail_open: AtomicU64,
    serialization_failures: AtomicU64,
    invalidations: AtomicU64,
    invalidation_failures: AtomicU64,
    stale_writes_dropped: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that went to the persistent store after a clean miss
    pub misses: u64,
    /// Reads and invalidations skipped because the policy was off
    pub bypassed: u64,
    /// Cache calls that failed or timed out and were absorbed
    pub fail_open: u64,
    /// Payloads that could not be encoded or decoded
    pub serialization_failures: u64,
    /// Mutations processed by the invalidator
    pub invalidations: u64,
    /// Evictions that could not be carried out
    pub invalidation_failures: u64,
    /// Loaded values kept out of the cache because an invalidation overlapped the load
    pub stale_writes_dropped: u64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl CatalogCacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        bump(&self.hits);
    }

    pub fn record_miss(&self) {
        bump(&self.misses);
    }

    pub fn record_bypass(&self) {
        bump(&self.bypassed);
    }

    pub fn record_fail_open(&self) {
        bump(&self.fail_open);
    }

    pub fn record_serialization_failure(&self) {
        bump(&self.serialization_failures);
    }

    pub fn record_invalidation(&self) {
        bump(&self.invalidations);
    }

    pub fn record_invalidation_failure(&self) {
        bump(&self.invalidation_failures);
    }

    pub fn record_stale_write_dropped(&self) {
        bump(&self.stale_writes_dropped);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            bypassed: self.bypassed.load(Ordering::Relaxed),
            fail_open: self.fail_open.load(Ordering::Relaxed),
            serialization_failures: self.serialization_failures.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            invalidation_failures: self.invalidation_failures.load(Ordering::Relaxed),
            stale_writes_dropped: self.stale_writes_dropped.load(Ordering::Relaxed),
        }
    }
}
