//! Detection Error Types
//!
//! Input errors are answered as-is; every upstream failure collapses to a
//! generic 500 and is only logged.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Message returned for any server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";

/// Detection-specific result type alias
pub type DetectionResult<T> = Result<T, DetectionError>;

/// Detection-specific error variants
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Text missing, not a string, or only whitespace
    #[error("Text input is required and must be a non-empty string")]
    EmptyText,

    /// Text exceeds the configured character limit
    #[error("Text input is too long. Maximum {} characters allowed.", group_thousands(.max))]
    TextTooLong { max: usize, actual: usize },

    /// Inference endpoint answered with a non-success status
    #[error("Hugging Face API error: {status}")]
    Upstream { status: u16, body: String },

    /// Inference endpoint answered with an unexpected body
    #[error("Malformed classifier response: {0}")]
    MalformedResponse(String),

    /// Transport failure (connect, timeout, decode)
    #[error("Classifier request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Inference credential missing
    #[error("HF_TOKEN is required")]
    MissingCredential,

    /// HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClientBuild(String),

    /// Classification failed; the cause is kept for logging
    #[error("Failed to analyze text for fake news detection")]
    AnalysisFailed(#[source] Box<DetectionError>),
}

impl DetectionError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DetectionError::EmptyText | DetectionError::TextTooLong { .. } => {
                ErrorKind::BadRequest
            }
            _ => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self.kind() {
            ErrorKind::BadRequest => AppError::bad_request(self.to_string()),
            kind => AppError::new(kind, INTERNAL_ERROR_MESSAGE).with_source(self),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            DetectionError::AnalysisFailed(cause) => match cause.as_ref() {
                DetectionError::Upstream { status, body } => {
                    tracing::error!(status, body = %body, "Classifier returned an error status");
                }
                other => {
                    tracing::error!(error = %other, "Classifier call failed");
                }
            },
            DetectionError::EmptyText | DetectionError::TextTooLong { .. } => {
                tracing::debug!(error = %self, "Rejected detection input");
            }
            _ => {
                tracing::error!(error = %self, "Detection internal error");
            }
        }
    }
}

impl IntoResponse for DetectionError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

/// `10000` -> `10,000`
fn group_thousands(n: &usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
