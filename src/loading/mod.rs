//! Global loading-state aggregation.
//!
//! Every screen reports its local busy flag under its own key; the
//! aggregator exposes the OR of all flags as a single signal that drives
//! the app-wide loading overlay.
//!
//! Two ways to report:
//!
//! - The raw keyed API ([`LoadingAggregator::set_component_loading`]),
//!   where the caller must report `false` on teardown itself.
//! - Scoped registrations ([`LoadingAggregator::register`]), which report
//!   `false` when dropped, and [`BusyToken`]s for individual units of work.
//!
//! # Example
//!
//! ```ignore
//! let aggregator = LoadingAggregator::new();
//! let news = aggregator.register("news");
//!
//! let token = news.begin();
//! assert!(aggregator.is_globally_busy());
//! drop(token);
//! assert!(!aggregator.is_globally_busy());
//! ```

mod key;
mod registration;
mod registry;

pub use key::ComponentKey;
pub use registration::{BusyToken, LoadingRegistration};
pub use registry::{Epoch, LoadingRegistry};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use tokio::sync::watch;

static GLOBAL: Lazy<LoadingAggregator> = Lazy::new(LoadingAggregator::new);

#[derive(Debug)]
struct Inner {
    registry: Mutex<LoadingRegistry>,
    busy_tx: watch::Sender<bool>,
}

/// Process-wide "is anything busy" signal.
///
/// Cloning yields another handle to the same registry. All operations are
/// synchronous; the registry update and the derived flag are published
/// under one lock, so every observer sees the flags in the same order they
/// were reported.
#[derive(Debug, Clone)]
pub struct LoadingAggregator {
    inner: Arc<Inner>,
}

impl LoadingAggregator {
    pub fn new() -> Self {
        let (busy_tx, _busy_rx) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(LoadingRegistry::new()),
                busy_tx,
            }),
        }
    }

    /// Shared instance created on first use and never torn down.
    pub fn global() -> &'static LoadingAggregator {
        &GLOBAL
    }

    /// Report `key`'s current busy state and recompute the global flag.
    pub fn set_component_loading(&self, key: impl Into<ComponentKey>, is_loading: bool) {
        let key = key.into();
        let mut registry = self.registry();
        tracing::debug!("Loading report: {}={}", key, is_loading);
        registry.set(key, is_loading);
        self.publish(&registry);
    }

    /// Forget every entry and force the global flag to idle.
    pub fn clear_all_loading_states(&self) {
        let mut registry = self.registry();
        let dropped = registry.busy_count();
        registry.clear();
        tracing::debug!("Cleared all loading states ({} busy entries dropped)", dropped);
        self.publish(&registry);
    }

    /// `false` for keys that were never reported or are idle.
    pub fn get_component_loading(&self, key: impl AsRef<str>) -> bool {
        self.registry().get(key.as_ref())
    }

    pub fn is_globally_busy(&self) -> bool {
        self.registry().is_busy()
    }

    /// Receiver for the global flag. Only flips are delivered as changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.busy_tx.subscribe()
    }

    pub fn busy_count(&self) -> usize {
        self.registry().busy_count()
    }

    pub fn busy_keys(&self) -> Vec<ComponentKey> {
        self.registry().busy_keys()
    }

    /// Resolve once nothing is busy.
    pub async fn wait_until_idle(&self) {
        let mut rx = self.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|busy| !*busy).await;
    }

    /// Scoped registration under a caller-chosen key.
    pub fn register(&self, key: impl Into<ComponentKey>) -> LoadingRegistration {
        LoadingRegistration::new(self.clone(), key.into())
    }

    /// Scoped registration under a generated key.
    pub fn register_anonymous(&self) -> LoadingRegistration {
        self.register(ComponentKey::generate())
    }

    pub(crate) fn begin_busy(&self, key: &ComponentKey) -> Option<Epoch> {
        let mut registry = self.registry();
        let epoch = registry.set(key.clone(), true);
        tracing::debug!("Loading report: {}=true (epoch {:?})", key, epoch);
        self.publish(&registry);
        epoch
    }

    pub(crate) fn finish_busy(&self, key: &ComponentKey, epoch: Epoch) {
        let mut registry = self.registry();
        if registry.finish(key.as_str(), epoch) {
            tracing::debug!("Loading report: {}=false (epoch {})", key, epoch);
            self.publish(&registry);
        } else {
            tracing::debug!("Ignoring stale completion for {} (epoch {})", key, epoch);
        }
    }

    pub(crate) fn current_epoch(&self, key: &ComponentKey) -> Option<Epoch> {
        self.registry().epoch_of(key.as_str())
    }

    fn registry(&self) -> MutexGuard<'_, LoadingRegistry> {
        // Registry updates cannot leave it half-written, so a poisoned lock is still usable.
        self.inner
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Must be called with the registry lock held.
    fn publish(&self, registry: &LoadingRegistry) {
        let now = registry.is_busy();
        self.inner.busy_tx.send_if_modified(|busy| {
            if *busy == now {
                false
            } else {
                *busy = now;
                true
            }
        });
    }
}

impl Default for LoadingAggregator {
    fn default() -> Self {
        Self::new()
    }
}
