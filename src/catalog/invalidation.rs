//! Invalidation of catalog cache entries after committed writes.
//!
//! The write path calls [`Invalidator::invalidate`] once the persistent store
//! has committed. Listing pages are evicted as a whole namespace on every
//! mutation, since any filter or page may now be stale. Eviction is
//! best-effort: failures are logged and counted, and the mutation stands.
//!
//! Every pass first advances the shared [`InvalidationGeneration`], so reads
//! that loaded before the commit do not write their values back afterwards.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::KeyValueStore;
use crate::catalog::generation::InvalidationGeneration;
use crate::catalog::keys::{single_item_key, LISTING_NAMESPACE};
use crate::catalog::metrics::CatalogCacheMetrics;
use crate::catalog::policy::CachePolicy;
use crate::catalog::settings::CacheSettings;

/// A committed change to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMutation {
    Created { id: i64 },
    Updated { id: i64 },
    Deleted { id: i64 },
}

impl CatalogMutation {
    /// The single-item entry this mutation makes stale, if any.
    ///
    /// A freshly created product has never been cached.
    pub fn stale_item(&self) -> Option<i64> {
        match *self {
            CatalogMutation::Created { .. } => None,
            CatalogMutation::Updated { id } | CatalogMutation::Deleted { id } => Some(id),
        }
    }
}

/// What an invalidation pass managed to do.
#[must_use]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvalidationReport {
    /// Whether the pass ran at all (policy on)
    pub applied: bool,
    pub item_evicted: bool,
    pub listings_evicted: Option<usize>,
}

#[derive(Clone)]
pub struct Invalidator {
    store: Arc<dyn KeyValueStore>,
    policy: CachePolicy,
    settings: CacheSettings,
    metrics: Arc<CatalogCacheMetrics>,
    generation: InvalidationGeneration,
}

impl Invalidator {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        policy: CachePolicy,
        settings: CacheSettings,
        metrics: Arc<CatalogCacheMetrics>,
        generation: InvalidationGeneration,
    ) -> Self {
        Self {
            store,
            policy,
            settings,
            metrics,
            generation,
        }
    }

    // == Invalidate ==
    /// Evicts the entries `mutation` may have made stale. Never fails.
    pub async fn invalidate(&self, mutation: CatalogMutation) -> InvalidationReport {
        // Advanced even with the policy off: a read that started while it was
        // on may still be about to write.
        self.generation.advance();

        if !self.policy.is_enabled() {
            debug!(?mutation, "cache disabled, skipping invalidation");
            self.metrics.record_bypass();
            return InvalidationReport::default();
        }

        self.metrics.record_invalidation();
        let mut report = InvalidationReport {
            applied: true,
            ..Default::default()
        };

        if let Some(id) = mutation.stale_item() {
            let key = single_item_key(id);
            match self.settings.bounded(self.store.delete(&key)).await {
                Ok(()) => report.item_evicted = true,
                Err(err) => {
                    warn!(key = %key, error = %err, "failed to evict product entry, it stays until TTL expiry");
                    self.metrics.record_invalidation_failure();
                }
            }
        }

        match self
            .settings
            .bounded(self.store.delete_prefix(LISTING_NAMESPACE))
            .await
        {
            Ok(count) => report.listings_evicted = Some(count),
            Err(err) => {
                warn!(error = %err, "failed to evict listing pages, they stay until TTL expiry");
                self.metrics.record_invalidation_failure();
            }
        }

        report
    }
}
