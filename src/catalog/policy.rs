//! Cache-enablement policy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared on/off switch for the whole catalog cache layer.
///
/// Clones share one flag. Components hold a clone and read it at the start
/// of every operation, so a toggle applies from the next call on. Turning the
/// cache off leaves existing entries in place.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    enabled: Arc<AtomicBool>,
}

impl CachePolicy {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Sets the flag, returning the previous state.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        self.enabled.swap(enabled, Ordering::AcqRel)
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let policy = CachePolicy::new(true);
        let observer = policy.clone();

        assert!(observer.is_enabled());
        assert!(policy.set_enabled(false));
        assert!(!observer.is_enabled());
    }
}
