//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type exchanged with the booking front-end, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending field, cap, plan...)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }
}

/// Error envelope returned to the booking front-end
///
/// - `code`: Numeric [`ErrorCode`]
/// - `message`: Human-readable message
/// - `details`: Additional error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::RateNotFound);
        assert_eq!(err.code, ErrorCode::RateNotFound);
        assert_eq!(err.message, "No rate defined for this food type and rate plan");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(ErrorCode::ValueOutOfRange, "Total too large")
            .with_detail("field", "total")
            .with_detail("pax", 100);

        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "total");
        assert_eq!(details.get("pax").unwrap(), 100);
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::RateNotFound).http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::with_message(ErrorCode::AdminRequired, "Only admins can cancel")
                .http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_config_error() {
        let err = AppError::config("bad rate table");
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.message, "bad rate table");
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::new(ErrorCode::RateNotFound).with_detail("ratePlan", "Gold");
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, 6001);
        assert!(response.details.is_some());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 6001);
        assert_eq!(json["details"]["ratePlan"], "Gold");
    }

    #[test]
    fn test_api_response_omits_empty_details() {
        let response = ApiResponse::error(&AppError::new(ErrorCode::ConfigError));
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"code":9005,"message":"Configuration error"}"#);
    }
}
