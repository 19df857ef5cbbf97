//! JSON error body shared by every endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::throttle::ThrottleError;

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(error: &ValidationError) -> Self {
        Self::new(ErrorCode::ValidationFailed, error.to_string())
            .with_details(serde_json::json!({ "field": error.field() }))
    }

    pub fn throttle(error: &ThrottleError) -> Self {
        Self::new(error.code(), error.to_string())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}
