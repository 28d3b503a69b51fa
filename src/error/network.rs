//! Network-related error types.

use std::fmt;

use crate::traits::HttpError;

/// Failures talking to the portal API at the transport or HTTP level.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed {
        url: String,
        message: String,
    },

    /// Request did not complete within the configured timeout.
    Timeout {
        operation: String,
        duration_secs: u64,
    },

    /// Non-2xx response.
    HttpStatus {
        status: u16,
        message: String,
    },

    /// The URL could not be built or parsed.
    InvalidUrl {
        url: String,
    },

    /// Request was cancelled.
    Cancelled,

    /// Anything else.
    Other {
        message: String,
    },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Message suitable for a screen's error banner.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the portal. Please check your internet connection.".to_string()
            }
            NetworkError::Timeout { duration_secs, .. } => {
                format!(
                    "The portal did not respond within {} seconds. Please try again.",
                    duration_secs
                )
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                404 => "The requested information was not found.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The portal is experiencing issues. Please try again later.".to_string(),
                _ => format!("The portal returned an error (HTTP {}). Please try again.", status),
            },
            NetworkError::InvalidUrl { url } => format!("Invalid portal address '{}'.", url),
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation, duration_secs } => {
                write!(f, "{} timed out after {} seconds", operation, duration_secs)
            }
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a transport-level [`HttpError`] into a [`NetworkError`].
///
/// `timeout_secs` is the configured request timeout, reported back when
/// the transport itself gave up.
pub fn classify_http_error(err: HttpError, url: &str, timeout_secs: u64) -> NetworkError {
    match err {
        HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message,
        },
        HttpError::Timeout(_) => NetworkError::Timeout {
            operation: format!("GET {}", url),
            duration_secs: timeout_secs,
        },
        HttpError::ServerError { status, message } => NetworkError::HttpStatus { status, message },
        HttpError::InvalidUrl(url) => NetworkError::InvalidUrl { url },
        HttpError::Cancelled => NetworkError::Cancelled,
        HttpError::Other(message) => NetworkError::Other { message },
    }
}
