//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Message returned for any server-side failure
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// The `#[error]` strings are the messages the browser client shows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing / blank
    #[error("Fill all the fields")]
    MissingFields,

    /// Input rejected by a value object (message and action preserved)
    #[error(transparent)]
    Validation(#[from] AppError),

    /// User name already exists
    #[error("Username already taken")]
    UserNameTaken,

    /// No user with that name (login)
    #[error("User not found")]
    UserNotFound,

    /// Invalid credentials (wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session cookie on a protected request
    #[error("Not authorized, no token")]
    MissingToken,

    /// Session token malformed, forged or expired
    #[error("Not authorized, invalid token")]
    InvalidToken,

    /// Token is valid but its user no longer exists
    #[error("User not found, please sign up")]
    SessionUserMissing,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields | AuthError::UserNotFound | AuthError::InvalidCredentials => {
                ErrorKind::BadRequest
            }
            AuthError::Validation(e) => e.kind(),
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::SessionUserMissing => {
                ErrorKind::Unauthorized
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures keep their cause as `source` only; the response
    /// carries a generic message.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(e) => e,
            AuthError::Database(e) => AppError::internal(INTERNAL_ERROR_MESSAGE).with_source(e),
            AuthError::Internal(msg) => {
                AppError::internal(INTERNAL_ERROR_MESSAGE).with_source(std::io::Error::other(msg))
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Validation(e) if e.is_server_error() => {
                tracing::error!(error = ?e, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected invalid session token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
