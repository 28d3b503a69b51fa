//! Common test utilities for integration tests.
//!
//! Provides a mock portal API with realistic payloads and a client wired to
//! it.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use campus_portal::{PortalApiClient, PortalConfig};
use std::time::Duration;

pub const TEST_BASE_URL: &str = "http://portal.test/api";

/// Absolute URL for `path` under the test base URL.
pub fn url(path: &str) -> String {
    format!("{}{}", TEST_BASE_URL, path)
}

/// Client against `mock` with a short timeout.
pub fn test_client(mock: &MockHttpClient) -> PortalApiClient<MockHttpClient> {
    let config = PortalConfig::new()
        .with_base_url(TEST_BASE_URL)
        .with_request_timeout(Duration::from_secs(2));
    PortalApiClient::with_http(&config, mock.clone())
}

/// Let spawned tasks run.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}
