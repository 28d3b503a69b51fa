//! Unified error type for the portal client.

use std::fmt;

use super::api::{ApiError, ConfigError};
use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;

/// Every fallible portal operation returns this.
///
/// Screens keep the `user_message()` of a failed fetch and offer a retry;
/// nothing here ever reaches the loading aggregator.
#[derive(Debug)]
pub enum PortalError {
    /// Transport and HTTP status failures.
    Network(NetworkError),

    /// Envelope and body failures.
    Api(ApiError),

    /// Bad configuration.
    Config(ConfigError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<PortalError>,
        context: ErrorContext,
    },
}

impl PortalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortalError::Network(NetworkError::HttpStatus { status, .. }) if *status < 500 => {
                ErrorCategory::Client
            }
            PortalError::Network(_) => ErrorCategory::Network,
            PortalError::Api(ApiError::Rejected { .. }) => ErrorCategory::Server,
            PortalError::Api(_) => ErrorCategory::Client,
            PortalError::Config(_) => ErrorCategory::Configuration,
            PortalError::WithContext { error, .. } => error.category(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            PortalError::Network(err) => err.is_retryable(),
            PortalError::Api(ApiError::Rejected { .. }) => true,
            PortalError::Api(_) => false,
            PortalError::Config(_) => false,
            PortalError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            PortalError::Network(err) => err.user_message(),
            PortalError::Api(err) => err.user_message(),
            PortalError::Config(err) => err.to_string(),
            PortalError::WithContext { error, .. } => error.user_message(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PortalError::Network(err) => err.error_code(),
            PortalError::Api(err) => err.error_code(),
            PortalError::Config(err) => err.error_code(),
            PortalError::WithContext { error, .. } => error.error_code(),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    pub fn with_context(self, ctx: ErrorContext) -> Self {
        PortalError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            PortalError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The innermost error, with any context layers peeled off.
    pub fn inner(&self) -> &PortalError {
        match self {
            PortalError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortalError::Network(err) => write!(f, "{}", err),
            PortalError::Api(err) => write!(f, "{}", err),
            PortalError::Config(err) => write!(f, "{}", err),
            PortalError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for PortalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortalError::Network(err) => Some(err),
            PortalError::Api(err) => Some(err),
            PortalError::Config(err) => Some(err),
            PortalError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<NetworkError> for PortalError {
    fn from(err: NetworkError) -> Self {
        PortalError::Network(err)
    }
}

impl From<ApiError> for PortalError {
    fn from(err: ApiError) -> Self {
        PortalError::Api(err)
    }
}

impl From<ConfigError> for PortalError {
    fn from(err: ConfigError) -> Self {
        PortalError::Config(err)
    }
}
