//! LRU Tracker Module
//!
//! Recency ordering for capacity eviction in the in-memory store.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order with a monotonically increasing tick per key.
///
/// The smallest tick is the least recently used key. Touch and remove are
/// O(log n), which matters once listing pages fill the store.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Tick -> key, oldest first
    by_tick: BTreeMap<u64, String>,
    /// Key -> its current tick
    ticks: HashMap<String, u64>,
    next_tick: u64,
}

impl LruTracker {
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        let tick = self.next_tick;
        self.next_tick += 1;

        if let Some(old) = self.ticks.insert(key.to_string(), tick) {
            self.by_tick.remove(&old);
        }
        self.by_tick.insert(tick, key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.by_tick.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and forgets the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_tick.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.by_tick.clear();
        self.ticks.clear();
    }
}
