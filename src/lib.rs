//! Campus Portal - headless data layer for a university portal client.
//!
//! Screens fetch their data independently and report busy/idle to a shared
//! [`LoadingAggregator`]; a single overlay observes the derived flag.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod config;
pub mod error;
pub mod loading;
pub mod logging;
pub mod models;
pub mod overlay;
pub mod refresh;
pub mod screen;
pub mod selection;
pub mod traits;

pub use api::PortalApiClient;
pub use config::PortalConfig;
pub use error::{PortalError, PortalResult};
pub use loading::{BusyToken, ComponentKey, LoadingAggregator, LoadingRegistration};
pub use overlay::{OverlayState, OverlayWatcher};
pub use refresh::RefreshTrigger;
pub use screen::{LoadOutcome, MountedPortal, MountedScreen, PortalScreens, Screen, ScreenState};
