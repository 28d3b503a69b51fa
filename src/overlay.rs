//! The global loading overlay, as a state observer.
//!
//! The overlay is the only consumer of the aggregator's derived flag. It
//! shows while anything is busy and hides when the last busy component
//! reports idle, whether that component succeeded or failed.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::loading::LoadingAggregator;

/// Visibility of the blocking overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Shown,
    Hidden,
}

impl From<bool> for OverlayState {
    fn from(busy: bool) -> Self {
        if busy {
            OverlayState::Shown
        } else {
            OverlayState::Hidden
        }
    }
}

impl OverlayState {
    pub fn is_shown(&self) -> bool {
        matches!(self, OverlayState::Shown)
    }
}

/// Background task following the aggregator and recording every transition.
#[derive(Debug)]
pub struct OverlayWatcher {
    rx: watch::Receiver<bool>,
    trace: Arc<Mutex<Vec<OverlayState>>>,
    handle: JoinHandle<()>,
}

impl OverlayWatcher {
    /// Start watching. Must be called from within a tokio runtime.
    pub fn spawn(aggregator: &LoadingAggregator) -> Self {
        let rx = aggregator.subscribe();
        let trace = Arc::new(Mutex::new(Vec::new()));

        let mut task_rx = rx.clone();
        let task_trace = Arc::clone(&trace);
        let handle = tokio::spawn(async move {
            while task_rx.changed().await.is_ok() {
                let state = OverlayState::from(*task_rx.borrow_and_update());
                match state {
                    OverlayState::Shown => tracing::info!("Loading overlay shown"),
                    OverlayState::Hidden => tracing::info!("Loading overlay hidden"),
                }
                task_trace
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(state);
            }
        });

        Self { rx, trace, handle }
    }

    /// Current visibility, read straight from the aggregator's channel.
    pub fn state(&self) -> OverlayState {
        OverlayState::from(*self.rx.borrow())
    }

    /// Transitions observed so far, oldest first.
    pub fn trace(&self) -> Vec<OverlayState> {
        self.trace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for OverlayWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
