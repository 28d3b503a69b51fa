//! Screen fetch components.
//!
//! A screen owns one fetch and the state a view would render from it:
//! data, an error message for the retry banner, and a loading flag that is
//! mirrored into the [`LoadingAggregator`].
//!
//! While mounted ([`Screen::mount`]), a screen loads once and again on
//! every refresh-trigger bump. A bump supersedes whatever fetch is in
//! flight, including a manual retry running elsewhere: the new fetch takes
//! over the busy report and the old one's result is discarded. Unmounting
//! reports the screen idle at once and aborts the task.

mod portal;

pub use portal::{MountedPortal, PortalScreens};

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::error::{ErrorContext, PortalResult};
use crate::loading::{BusyToken, LoadingAggregator, LoadingRegistration};
use crate::refresh::RefreshTrigger;

/// Produces one fetch of a screen's data.
pub type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, PortalResult<T>> + Send + Sync>;

/// What a view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState<T> {
    pub data: Option<T>,
    /// User-facing message of the last failed fetch.
    pub error: Option<String>,
    pub loading: bool,
    pub last_loaded_at: Option<DateTime<Utc>>,
    /// Consecutive failed fetches; reset on success.
    pub failures: u32,
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
            last_loaded_at: None,
            failures: 0,
        }
    }
}

/// Result of one [`Screen::load`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// A fetch was already in flight.
    Skipped,
    /// A newer load (or an unmount) took over before this fetch returned;
    /// its result was discarded.
    Superseded,
}

/// Shared state plus the bookkeeping of the load that currently owns it.
struct Slot<T> {
    state: ScreenState<T>,
    /// Bumped by every load start and by cancellation.
    generation: u64,
    /// Busy report of the owning load.
    token: Option<BusyToken>,
}

struct ScreenInner<T> {
    name: String,
    registration: LoadingRegistration,
    fetcher: Fetcher<T>,
    slot: Mutex<Slot<T>>,
}

/// A headless screen. Clones share state.
pub struct Screen<T> {
    inner: Arc<ScreenInner<T>>,
}

impl<T> Clone for Screen<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Screen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("name", &self.inner.name)
            .field("key", self.inner.registration.key())
            .finish()
    }
}

/// Clears the screen's loading flag and ends its busy report when dropped,
/// whether the fetch finished or was abandoned. A superseded load leaves
/// both alone; they belong to its successor.
struct InFlight<T> {
    screen: Arc<ScreenInner<T>>,
    generation: u64,
}

impl<T> Drop for InFlight<T> {
    fn drop(&mut self) {
        let token = {
            let mut slot = lock(&self.screen.slot);
            if slot.generation != self.generation {
                return;
            }
            slot.state.loading = false;
            slot.token.take()
        };
        // Released outside the slot lock.
        drop(token);
    }
}

fn lock<T>(slot: &Mutex<Slot<T>>) -> MutexGuard<'_, Slot<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Screen<T> {
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn registration(&self) -> &LoadingRegistration {
        &self.inner.registration
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.inner.slot).state.loading
    }

    /// Report the screen idle and discard the result of any load in flight.
    pub fn cancel(&self) {
        let token = {
            let mut slot = lock(&self.inner.slot);
            slot.generation += 1;
            slot.state.loading = false;
            slot.token.take()
        };
        drop(token);
    }
}

impl<T> Screen<T>
where
    T: Clone + Send + 'static,
{
    /// Screen registered under its own name.
    pub fn new<F, Fut>(name: impl Into<String>, aggregator: &LoadingAggregator, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PortalResult<T>> + Send + 'static,
    {
        let name = name.into();
        let registration = aggregator.register(name.as_str());
        Self::with_registration(name, registration, fetch)
    }

    pub fn with_registration<F, Fut>(
        name: impl Into<String>,
        registration: LoadingRegistration,
        fetch: F,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PortalResult<T>> + Send + 'static,
    {
        let fetcher: Fetcher<T> = Arc::new(move || fetch().boxed());
        Self {
            inner: Arc::new(ScreenInner {
                name: name.into(),
                registration,
                fetcher,
                slot: Mutex::new(Slot {
                    state: ScreenState::default(),
                    generation: 0,
                    token: None,
                }),
            }),
        }
    }

    pub fn state(&self) -> ScreenState<T> {
        lock(&self.inner.slot).state.clone()
    }

    /// Run the fetch once.
    ///
    /// On success the data is replaced and the error cleared. On failure
    /// the previous data is kept and the error message stored. Either way
    /// the screen ends up idle.
    ///
    /// If a fetch is already in flight and still reported busy, this is a
    /// no-op. If its busy report was cleared (a pull-to-refresh reset the
    /// aggregator), this load supersedes it so the screen is reported busy
    /// again.
    pub async fn load(&self) -> LoadOutcome {
        self.run(false).await
    }

    /// Manual retry from the error banner. Same fetch as [`Screen::load`].
    pub async fn retry(&self) -> LoadOutcome {
        tracing::debug!("Retrying screen {}", self.inner.name);
        self.load().await
    }

    /// Fetch now, superseding any load in flight.
    pub async fn reload(&self) -> LoadOutcome {
        self.run(true).await
    }

    async fn run(&self, supersede: bool) -> LoadOutcome {
        match self.start(supersede) {
            Some(in_flight) => self.complete(in_flight).await,
            None => LoadOutcome::Skipped,
        }
    }

    /// Mark the screen loading and take over its busy report. `None` when a
    /// reported load is already in flight and `supersede` is false.
    fn start(&self, supersede: bool) -> Option<InFlight<T>> {
        let (in_flight, previous) = {
            let mut slot = lock(&self.inner.slot);
            if slot.state.loading {
                let reported = slot.token.as_ref().map_or(false, BusyToken::is_current);
                if reported && !supersede {
                    return None;
                }
                tracing::debug!("Superseding in-flight load of {}", self.inner.name);
            }
            slot.state.loading = true;
            slot.generation += 1;
            // The new report is stamped before the old token is released,
            // so the old one is already stale when it drops.
            let previous = slot.token.replace(self.inner.registration.begin());
            let in_flight = InFlight {
                screen: Arc::clone(&self.inner),
                generation: slot.generation,
            };
            (in_flight, previous)
        };
        drop(previous);
        Some(in_flight)
    }

    async fn complete(&self, in_flight: InFlight<T>) -> LoadOutcome {
        let result = (self.inner.fetcher)().await;

        let outcome = {
            let mut slot = lock(&self.inner.slot);
            if slot.generation != in_flight.generation {
                tracing::debug!("Discarding superseded result for {}", self.inner.name);
                return LoadOutcome::Superseded;
            }
            let state = &mut slot.state;
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                    state.failures = 0;
                    state.last_loaded_at = Some(Utc::now());
                    tracing::info!("Screen {} loaded", self.inner.name);
                    LoadOutcome::Loaded
                }
                Err(err) => {
                    let ctx = ErrorContext::new("load")
                        .with_screen(self.inner.name.as_str())
                        .with_retry_count(state.failures);
                    tracing::warn!(
                        "Screen load failed: {} [{}] {}",
                        err,
                        err.error_code(),
                        ctx.to_log_string()
                    );
                    state.error = Some(err.user_message());
                    state.failures += 1;
                    LoadOutcome::Failed
                }
            }
        };

        drop(in_flight);
        outcome
    }

    /// Start the screen's lifecycle task. Requires a tokio runtime.
    pub fn mount(&self, refresh: &RefreshTrigger) -> MountedScreen<T> {
        let screen = self.clone();
        let mut refresh_rx = refresh.subscribe();

        tracing::debug!("Mounting screen {}", self.inner.name);

        let handle = tokio::spawn(async move {
            let mut next = screen.start(true);
            while let Some(in_flight) = next.take() {
                let load = screen.complete(in_flight);
                tokio::pin!(load);

                tokio::select! {
                    _ = &mut load => {
                        if refresh_rx.changed().await.is_err() {
                            return;
                        }
                    }
                    changed = refresh_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        tracing::debug!("Refresh during load of {}, restarting", screen.name());
                    }
                }

                // Started while the old load is still alive, so the busy
                // report passes straight from one to the other.
                next = screen.start(true);
            }
        });

        MountedScreen {
            screen: self.clone(),
            handle,
        }
    }
}

/// A screen whose lifecycle task is running.
#[derive(Debug)]
pub struct MountedScreen<T> {
    screen: Screen<T>,
    handle: JoinHandle<()>,
}

impl<T> MountedScreen<T>
where
    T: Clone + Send + 'static,
{
    pub fn screen(&self) -> &Screen<T> {
        &self.screen
    }

    pub fn state(&self) -> ScreenState<T> {
        self.screen.state()
    }

    /// Stop the task and wait for it to be gone.
    pub async fn unmount(mut self) {
        tracing::debug!("Unmounting screen {}", self.screen.name());
        self.screen.cancel();
        self.handle.abort();
        let _ = (&mut self.handle).await;
    }
}

/// Reports the screen idle before returning; the aborted task itself is
/// reaped later by the runtime.
impl<T> Drop for MountedScreen<T> {
    fn drop(&mut self) {
        self.screen.cancel();
        self.handle.abort();
    }
}
