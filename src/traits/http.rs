//! HTTP client trait abstraction.
//!
//! The portal API client only needs GET. Screens receive their data
//! through [`HttpClient`] so tests can swap in
//! [`MockHttpClient`](crate::adapters::mock::MockHttpClient).

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// Header name to value. Names are lowercase on responses.
pub type Headers = HashMap<String, String>;

/// A fully buffered response. Any status is a successful exchange.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// JSON response with the given status.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::with_headers(status, headers, Bytes::from(value.to_string()))
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    ConnectionFailed(String),
    Timeout(String),
    ServerError { status: u16, message: String },
    Cancelled,
    InvalidUrl(String),
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "could not connect: {}", msg),
            HttpError::Timeout(msg) => write!(f, "timed out: {}", msg),
            HttpError::ServerError { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            HttpError::Cancelled => write!(f, "request cancelled"),
            HttpError::InvalidUrl(msg) => write!(f, "invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Transport used by the portal API client.
///
/// Non-2xx statuses are returned as `Ok(Response)`; interpreting them is
/// the caller's job.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url`. Non-2xx statuses come back as `Ok`.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(301, Bytes::new()).is_success());
        assert!(!Response::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_json_body() {
        let value = serde_json::json!({ "success": true, "data": [1, 2, 3] });
        let response = Response::json_body(200, &value);

        assert_eq!(
            response.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        let parsed: serde_json::Value = response.json().unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_response_text() {
        let response = Response::new(200, "Hello, campus");
        assert_eq!(response.text().unwrap(), "Hello, campus");
    }

    #[test]
    fn test_http_error_display() {
        let err = HttpError::ServerError {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: down");
    }
}
