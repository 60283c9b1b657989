use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ai::AiError;
use crate::editors::photo::PhotoError;
use crate::shell::ShellError;
use crate::store::slots::StorageError;
use crate::store::transfer::ImportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("AI credential is not configured")]
    AiNotConfigured,

    #[error("AI error: {0}")]
    Ai(String),

    #[error("Invalid import: {0}")]
    Import(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl From<AiError> for AppError {
    fn from(e: AiError) -> Self {
        match e {
            AiError::NotConfigured => AppError::AiNotConfigured,
            other => AppError::Ai(other.to_string()),
        }
    }
}

impl From<ImportError> for AppError {
    fn from(e: ImportError) -> Self {
        match e {
            ImportError::Storage(e) => AppError::Storage(e),
            other => AppError::Import(other.to_string()),
        }
    }
}

impl From<PhotoError> for AppError {
    fn from(e: PhotoError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<ShellError> for AppError {
    fn from(e: ShellError) -> Self {
        match e {
            ShellError::DonationOutsideEditor => AppError::Conflict(e.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::AiNotConfigured => (
                StatusCode::PRECONDITION_FAILED,
                "AI_NOT_CONFIGURED",
                "Configure your Gemini API key in settings first".to_string(),
            ),
            AppError::Ai(msg) => {
                tracing::error!("AI error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_ERROR",
                    "The AI request failed. Please try again".to_string(),
                )
            }
            AppError::Import(msg) => (StatusCode::BAD_REQUEST, "INVALID_IMPORT", msg.clone()),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Your change could not be saved".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_maps_to_precondition_failed() {
        let err: AppError = AiError::NotConfigured.into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::PRECONDITION_FAILED
        );
    }

    #[test]
    fn test_transport_failure_maps_to_bad_gateway() {
        let err: AppError = AiError::EmptyContent.into();
        assert!(matches!(err, AppError::Ai(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_shell_errors_map_to_client_errors() {
        let err: AppError = ShellError::BlankJobDescription.into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        let err: AppError = ShellError::DonationOutsideEditor.into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_render_error_maps_to_internal_error() {
        let err: AppError = askama::Error::Fmt(std::fmt::Error).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_import_error_maps_to_bad_request() {
        let err: AppError = ImportError::NotAnObject.into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
