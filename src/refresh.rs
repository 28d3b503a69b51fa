//! Pull-to-refresh fan-out.
//!
//! One gesture bumps a shared counter; every mounted screen watching the
//! counter re-runs its fetch.

use tokio::sync::watch;

use crate::loading::LoadingAggregator;

/// Externally incremented counter that tells screens to refetch.
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    tx: watch::Sender<u64>,
}

impl RefreshTrigger {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Increment the counter and wake every watcher. Returns the new value.
    pub fn bump(&self) -> u64 {
        let mut value = 0;
        self.tx.send_modify(|count| {
            *count += 1;
            value = *count;
        });
        value
    }

    /// Reset the aggregator, then ask every screen to refetch.
    ///
    /// Clearing first means entries left over from the previous cycle can
    /// neither keep the overlay up nor end the new cycle early.
    pub fn pull_to_refresh(&self, aggregator: &LoadingAggregator) -> u64 {
        aggregator.clear_all_loading_states();
        let generation = self.bump();
        tracing::info!("Pull to refresh (generation {})", generation);
        generation
    }
}

impl Default for RefreshTrigger {
    fn default() -> Self {
        Self::new()
    }
}
