//! Unified error handling for the portal client.
//!
//! - **Categories**: high-level classification for retry decisions
//! - **Domain errors**: `NetworkError`, `ApiError`, `ConfigError`
//! - **Unified type**: `PortalError` consolidates them
//! - **Context**: operation and screen attached for logging
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Server | 5xx or `success: false` | Yes |
//! | Client | 4xx, undecodable body | No |
//! | Configuration | Bad settings | No |
//!
//! Fetch errors stay inside the screen that produced them. The loading
//! aggregator only ever sees `loading = false`.

mod api;
mod category;
mod context;
mod network;
mod portal_error;
mod result;

pub use api::{ApiError, ConfigError};
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use network::{classify_http_error, NetworkError};
pub use portal_error::PortalError;
pub use result::{PortalResult, ResultExt};
