// ABOUTME: API error type and its conversion into JSON error responses
// ABOUTME: Maps domain errors to HTTP status codes and machine-readable error codes

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use finadvisor_ai::AIServiceError;
use finadvisor_documents::PdfError;
use finadvisor_news::NewsSearchError;
use finadvisor_storage::StorageError;

/// Main application error type that all handlers return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Model error: {0}")]
    Model(#[from] AIServiceError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("News search error: {0}")]
    NewsSearch(#[from] NewsSearchError),
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl AppError {
    /// Convert AppError to appropriate HTTP status code and error code
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::Upstream(_) => (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            AppError::Storage(storage_error) => match storage_error {
                StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
                StorageError::Duplicate(_) => (StatusCode::BAD_REQUEST, "DUPLICATE"),
                StorageError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
            AppError::Model(_) => (StatusCode::SERVICE_UNAVAILABLE, "MODEL_UNAVAILABLE"),
            AppError::Pdf(_) => (StatusCode::BAD_REQUEST, "PDF_ERROR"),
            AppError::NewsSearch(search_error) => match search_error {
                NewsSearchError::EmptyQuery => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                NewsSearchError::NotConfigured => {
                    (StatusCode::SERVICE_UNAVAILABLE, "SEARCH_NOT_CONFIGURED")
                }
                _ => (StatusCode::SERVICE_UNAVAILABLE, "SEARCH_UNAVAILABLE"),
            },
        }
    }

    /// Get user-friendly error message (sanitized for external consumption)
    fn to_user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(resource) => format!("{} not found", resource),
            AppError::Forbidden { message } => message.clone(),
            AppError::Upstream(msg) => msg.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            AppError::Storage(storage_error) => match storage_error {
                StorageError::NotFound(_)
                | StorageError::Duplicate(_)
                | StorageError::InvalidInput(_) => storage_error.to_string(),
                _ => "Data storage error".to_string(),
            },
            AppError::Model(AIServiceError::NoApiKey) => {
                "AI service is not configured".to_string()
            }
            AppError::Model(model_error) => format!("AI service unavailable: {}", model_error),
            AppError::Pdf(pdf_error) => pdf_error.to_string(),
            AppError::NewsSearch(search_error) => search_error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();
        let user_message = self.to_user_message();

        // Log internal errors with full context but don't expose details
        if status_code.is_server_error() {
            match &self {
                AppError::Model(_) | AppError::NewsSearch(_) | AppError::Upstream(_) => {
                    warn!(
                        request_id = %request_id,
                        error_code = %error_code,
                        error = %self,
                        "Upstream service failure"
                    );
                }
                _ => {
                    error!(
                        request_id = %request_id,
                        error = %self,
                        "Internal server error occurred"
                    );
                }
            }
        } else {
            info!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "API error response"
            );
        }

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: user_message,
            },
            request_id,
        };

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status() {
        let (status, code) = AppError::validation("bad").to_status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_storage_errors_map_by_kind() {
        let not_found = AppError::from(StorageError::NotFound("User".to_string()));
        assert_eq!(not_found.to_status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_user_message(), "User not found");

        let duplicate = AppError::from(StorageError::Duplicate(
            "Username already registered".to_string(),
        ));
        assert_eq!(duplicate.to_status_and_code().0, StatusCode::BAD_REQUEST);
        assert_eq!(duplicate.to_user_message(), "Username already registered");

        let hashing = AppError::from(StorageError::Hashing("salt".to_string()));
        assert_eq!(
            hashing.to_status_and_code().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(hashing.to_user_message(), "Data storage error");
    }

    #[test]
    fn test_upstream_failures_are_503() {
        let model = AppError::from(AIServiceError::Timeout(60));
        assert_eq!(model.to_status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);

        let search = AppError::from(NewsSearchError::NotConfigured);
        assert_eq!(search.to_status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);

        let empty = AppError::from(NewsSearchError::EmptyQuery);
        assert_eq!(empty.to_status_and_code().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pdf_errors_are_bad_requests() {
        let error = AppError::from(PdfError::InvalidBase64("bad symbol".to_string()));
        assert_eq!(error.to_status_and_code().0, StatusCode::BAD_REQUEST);
        assert!(error.to_user_message().contains("Invalid base64"));
    }

    #[test]
    fn test_user_message_sanitization() {
        let internal_error = AppError::internal(anyhow::anyhow!(
            "Database connection failed with password xyz"
        ));
        let message = internal_error.to_user_message();
        assert_eq!(message, "An internal server error occurred");
        assert!(!message.contains("xyz"));
    }
}
