//! Error category classification.
//!
//! Categories decide whether a screen offers an automatic retry and which
//! hint accompanies its error message.

use std::fmt;

/// High-level categorization of portal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout problems. Transient.
    Network,

    /// The API answered with a 5xx status or refused the request
    /// through its `success: false` envelope.
    Server,

    /// The response could not be understood (bad JSON, missing payload).
    Client,

    /// Invalid or missing configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Suggested recovery action shown next to a retry button.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Server => "The portal is having trouble right now. Please try again later",
            ErrorCategory::Client => "The portal sent something unexpected. Please report this if it persists",
            ErrorCategory::Configuration => "Check the portal API settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Network.to_string(), "network");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }

    #[test]
    fn test_recovery_hints_not_empty() {
        for category in [
            ErrorCategory::Network,
            ErrorCategory::Server,
            ErrorCategory::Client,
            ErrorCategory::Configuration,
        ] {
            assert!(!category.recovery_hint().is_empty());
        }
    }
}
