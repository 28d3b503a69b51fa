//! Remote portal API.
//!
//! The API is an opaque collaborator: each endpoint answers GET with an
//! [`ApiEnvelope`]. Screens only see `PortalResult<T>`.

mod client;
mod endpoint;
mod envelope;

pub use client::PortalApiClient;
pub use endpoint::Endpoint;
pub use envelope::ApiEnvelope;
