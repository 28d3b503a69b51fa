//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable, queueable responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
