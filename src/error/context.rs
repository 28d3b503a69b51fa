//! Context attached to errors for debugging.

use chrono::{DateTime, Utc};

/// Where and when an error happened.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Operation that failed, e.g. `fetch_news`.
    pub operation: String,

    /// Screen that issued the operation, if any.
    pub screen: Option<String>,

    /// When the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Number of retries attempted before this error.
    pub retry_count: u32,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            screen: None,
            timestamp: Utc::now(),
            retry_count: 0,
        }
    }

    pub fn with_screen(mut self, screen: impl Into<String>) -> Self {
        self.screen = Some(screen.into());
        self
    }

    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    /// Format as `key=value` pairs for structured log lines.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref screen) = self.screen {
            parts.push(format!("screen={}", screen));
        }

        if self.retry_count > 0 {
            parts.push(format!("retry_count={}", self.retry_count));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref screen) = self.screen {
            write!(f, " screen={}", screen)?;
        }

        if self.retry_count > 0 {
            write!(f, " retry={}", self.retry_count)?;
        }

        Ok(())
    }
}
