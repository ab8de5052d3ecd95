/// Error handling for the web server
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `Result<T, WebError>` which converts to an HTML error
/// page with the appropriate status code. All error feedback in this system
/// is human-readable page text; there are no machine-readable error bodies.
///
/// Recoverable conditions (validation failures, bad credentials) are not
/// errors here: handlers turn those into flash messages and redirects.

use crate::views;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskboard_shared::auth::{password::PasswordError, session::SessionError};

/// Web result type alias
pub type WebResult<T> = Result<T, WebError>;

/// Unified web error type
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Resource not found (404), e.g. update/delete on a missing task id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error (500): store unavailable, signing failure, ...
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                views::error_page("404 Not Found", &msg),
            )
                .into_response(),
            WebError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                views::error_page("400 Bad Request", &msg),
            )
                .into_response(),
            WebError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::error_page("500 Internal Server Error", "Something went wrong."),
                )
                    .into_response()
            }
        }
    }
}

/// Convert sqlx errors to web errors
impl From<sqlx::Error> for WebError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => WebError::NotFound("Resource not found".to_string()),
            _ => WebError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to web errors
impl From<PasswordError> for WebError {
    fn from(err: PasswordError) -> Self {
        WebError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert session errors to web errors
impl From<SessionError> for WebError {
    fn from(err: SessionError) -> Self {
        WebError::Internal(format!("Session operation failed: {}", err))
    }
}
