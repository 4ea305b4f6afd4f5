//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::models::PriceEstimateResponse;
use crate::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned when the body is not a usable JSON object
pub const JSON_REQUIRED: &str = "JSON data is required";

/// Message returned when the item description is missing or empty
pub const DESCRIPTION_REQUIRED: &str = "item description is required";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Request validation failed; the message is returned to the caller as is
    #[error("{0}")]
    Validation(String),

    /// Model provider failure
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Provider(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert to the public failure body
    pub fn to_response_body(&self) -> PriceEstimateResponse {
        PriceEstimateResponse::failure(self.to_string())
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        }

        (status, Json(self.to_response_body())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
pub mod helpers {
    use super::*;

    /// Create validation error
    pub fn validation_error(message: impl Into<String>) -> AppError {
        AppError::Validation(message.into())
    }

    /// Create internal error
    pub fn internal_error(message: impl Into<String>) -> AppError {
        AppError::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation("test".to_string()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Internal("test".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::Provider(ProviderError::Network("down".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = helpers::validation_error(JSON_REQUIRED);
        assert_eq!(err.to_string(), "JSON data is required");
    }

    #[test]
    fn test_provider_message_is_transparent() {
        let provider = ProviderError::Network("connection refused".to_string());
        let expected = provider.to_string();
        let err: AppError = provider.into();
        assert_eq!(err.to_string(), expected);
    }
}
