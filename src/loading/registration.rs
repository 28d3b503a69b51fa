//! Scoped registrations: reporting idle is tied to `Drop`.

use super::key::ComponentKey;
use super::registry::Epoch;
use super::LoadingAggregator;

/// A component's claim on a key in the aggregator.
///
/// Dropping the registration reports the key idle, whatever was last
/// reported. A component that goes away mid-fetch therefore cannot leave
/// the overlay stuck.
#[derive(Debug)]
pub struct LoadingRegistration {
    aggregator: LoadingAggregator,
    key: ComponentKey,
}

impl LoadingRegistration {
    pub(super) fn new(aggregator: LoadingAggregator, key: ComponentKey) -> Self {
        tracing::trace!("Registered loading key {}", key);
        Self { aggregator, key }
    }

    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    pub fn aggregator(&self) -> &LoadingAggregator {
        &self.aggregator
    }

    /// Report the component's local loading flag.
    pub fn set_loading(&self, is_loading: bool) {
        self.aggregator.set_component_loading(&self.key, is_loading);
    }

    pub fn is_loading(&self) -> bool {
        self.aggregator.get_component_loading(&self.key)
    }

    /// Mark the key busy for the lifetime of the returned token.
    pub fn begin(&self) -> BusyToken {
        let epoch = self.aggregator.begin_busy(&self.key);
        BusyToken {
            aggregator: self.aggregator.clone(),
            key: self.key.clone(),
            epoch,
        }
    }

    /// Report idle and release the key.
    pub fn unregister(self) {
        drop(self);
    }
}

impl Drop for LoadingRegistration {
    fn drop(&mut self) {
        tracing::trace!("Releasing loading key {}", self.key);
        self.aggregator.set_component_loading(&self.key, false);
    }
}

/// One in-flight unit of work.
///
/// Finishing (or dropping) the token reports idle only if no later busy
/// report or [`LoadingAggregator::clear_all_loading_states`] superseded
/// it. A fetch that started before a pull-to-refresh cannot end the
/// refreshed cycle's busy state.
#[derive(Debug)]
#[must_use = "dropping a BusyToken immediately reports the component idle"]
pub struct BusyToken {
    aggregator: LoadingAggregator,
    key: ComponentKey,
    epoch: Option<Epoch>,
}

impl BusyToken {
    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// Whether this token's busy report is still the live one.
    pub fn is_current(&self) -> bool {
        self.epoch.is_some() && self.aggregator.current_epoch(&self.key) == self.epoch
    }

    /// Report idle now.
    pub fn finish(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(epoch) = self.epoch.take() {
            self.aggregator.finish_busy(&self.key, epoch);
        }
    }
}

impl Drop for BusyToken {
    fn drop(&mut self) {
        self.release();
    }
}
