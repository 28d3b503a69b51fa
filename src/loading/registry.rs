//! Keyed busy flags and their logical OR.

use std::collections::HashMap;

use super::key::ComponentKey;

/// Epoch stamped on a busy entry when it was reported.
pub type Epoch = u64;

/// The aggregator's state.
///
/// Only busy keys are stored; reporting idle removes the entry, so an idle
/// key and an absent key are indistinguishable. The global flag is
/// therefore `!entries.is_empty()` and cannot drift from the entries.
///
/// Every busy report stamps its entry with a fresh epoch. A completion
/// carrying an older epoch ([`LoadingRegistry::finish`]) is ignored.
#[derive(Debug, Default)]
pub struct LoadingRegistry {
    entries: HashMap<ComponentKey, Epoch>,
    epoch: Epoch,
}

impl LoadingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert `key`. Returns the epoch stamped on the entry when busy.
    pub fn set(&mut self, key: ComponentKey, is_loading: bool) -> Option<Epoch> {
        if is_loading {
            self.epoch += 1;
            self.entries.insert(key, self.epoch);
            Some(self.epoch)
        } else {
            self.entries.remove(&key);
            None
        }
    }

    /// Mark `key` idle only if it is still busy from the report stamped `epoch`.
    pub fn finish(&mut self, key: &str, epoch: Epoch) -> bool {
        match self.entries.get(key) {
            Some(current) if *current == epoch => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Drop every entry and advance the epoch past all outstanding reports.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.epoch += 1;
    }

    /// Latest epoch handed out or passed by a clear.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn get(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn epoch_of(&self, key: &str) -> Option<Epoch> {
        self.entries.get(key).copied()
    }

    pub fn is_busy(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn busy_count(&self) -> usize {
        self.entries.len()
    }

    /// Busy keys in sorted order.
    pub fn busy_keys(&self) -> Vec<ComponentKey> {
        let mut keys: Vec<ComponentKey> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}
