use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use nbpreview_git_utils::FetchError;

/// Main application error type that all handlers should return
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request input; the message is sent to the client as-is
    #[error("{0}")]
    Validation(String),

    #[error("GitHub CLI (gh) is not available")]
    GhUnavailable,

    #[error("Invalid repository URL")]
    InvalidRepositoryUrl,

    /// gh failed or returned something unusable; diagnostic passed through verbatim
    #[error("{0}")]
    Upstream(String),

    #[error("Invalid notebook format")]
    InvalidNotebookFormat,
}

/// Error body shared by every endpoint
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    /// Convert AppError to appropriate HTTP status code and error code
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::GhUnavailable => (StatusCode::INTERNAL_SERVER_ERROR, "GH_UNAVAILABLE"),
            AppError::InvalidRepositoryUrl => (StatusCode::BAD_REQUEST, "INVALID_REPOSITORY_URL"),
            AppError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            AppError::InvalidNotebookFormat => (StatusCode::BAD_REQUEST, "INVALID_NOTEBOOK"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();

        if status_code.is_server_error() {
            error!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "Request failed"
            );
        } else {
            // Client input problems are expected and only logged at info level
            info!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "API error response"
            );
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::upstream(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}
