use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use guestbook_core::guest::ErrorResponse;
use guestbook_core::storage::{repository_error_to_status_code, RepositoryError};

/// Handler error rendered as `{"error": "<message>"}`.
///
/// Storage failures carry the underlying [`RepositoryError`] for logging
/// but only ever expose the fixed per-operation message to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    PayloadTooLarge(&'static str),
    #[error("{message}")]
    Repository {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl ApiError {
    /// Adapter for `map_err` that tags a repository error with its response message.
    pub fn repository(message: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| ApiError::Repository { message, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Repository { source, .. } => {
                StatusCode::from_u16(repository_error_to_status_code(source))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Repository { message, source } if status.is_server_error() => {
                tracing::error!(
                    status = %status,
                    reason = message,
                    error = %source,
                    "Storage operation failed"
                );
            }
            ApiError::Repository { message, source } => {
                tracing::warn!(
                    status = %status,
                    reason = message,
                    error = %source,
                    "Storage rejected request"
                );
            }
            ApiError::NotFound(message) => {
                tracing::debug!(status = %status, reason = message, "Not found");
            }
            ApiError::BadRequest(message) | ApiError::PayloadTooLarge(message) => {
                tracing::warn!(status = %status, reason = message, "API error");
            }
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
