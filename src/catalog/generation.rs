//! Invalidation generation counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counts invalidation passes so a populating read can tell whether one ran
/// while it was loading from the persistent store.
///
/// Clones share one counter. The invalidator advances it before evicting
/// anything; a read samples it before loading and checks it again around its
/// cache write.
#[derive(Debug, Clone, Default)]
pub struct InvalidationGeneration {
    current: Arc<AtomicU64>,
}

impl InvalidationGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Starts a new generation, returning it.
    pub fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }
}
