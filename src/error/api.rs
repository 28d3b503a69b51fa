//! Errors produced while interpreting a portal API response body.

use thiserror::Error;

/// The request reached the API, but the body could not be turned into data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The envelope said `success: false`.
    #[error("API rejected the request: {message}")]
    Rejected { message: String },

    /// The envelope said `success: true` but carried no `data`.
    #[error("API response for {endpoint} carried no data")]
    MissingData { endpoint: String },

    /// The body was not a valid envelope for the expected payload.
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidBody { endpoint: String, message: String },
}

impl ApiError {
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message } if !message.is_empty() => message.clone(),
            ApiError::Rejected { .. } => "The portal could not complete the request.".to_string(),
            ApiError::MissingData { .. } => "The portal returned no information.".to_string(),
            ApiError::InvalidBody { .. } => {
                "Received an invalid response from the portal. Please try again.".to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Rejected { .. } => "E_API_REJECTED",
            ApiError::MissingData { .. } => "E_API_NO_DATA",
            ApiError::InvalidBody { .. } => "E_API_INVALID",
        }
    }
}

/// Configuration loading failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("PORTAL_API_URL must not be empty")]
    EmptyBaseUrl,

    #[error("Invalid request timeout '{value}': expected a positive number of seconds")]
    InvalidTimeout { value: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::EmptyBaseUrl => "E_CFG_URL",
            ConfigError::InvalidTimeout { .. } => "E_CFG_TIMEOUT",
        }
    }
}
