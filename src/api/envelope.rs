use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The JSON wrapper every portal endpoint answers with:
/// `{"success": bool, "data": T?, "message": string?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Unwrap the payload. `endpoint` names the source in errors.
    pub fn into_result(self, endpoint: &str) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                message: self.message.unwrap_or_default(),
            });
        }
        self.data.ok_or_else(|| ApiError::MissingData {
            endpoint: endpoint.to_string(),
        })
    }
}
