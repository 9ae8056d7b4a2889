//! Error types for the chat adapter
//!
//! Every failure a request can hit is classified into one of a small, closed
//! set of kinds. Each kind renders as a single-field `{"error": "..."}` body
//! with a fixed status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Generic message returned for internal failures. Internal details are logged, never sent.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authorization header is missing")]
    MissingCredential,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Upstream service returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Upstream service returned an empty body (status {status})")]
    EmptyUpstreamBody { status: u16 },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error taxonomy exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    InvalidRequest,
    UpstreamFailure,
    InternalFailure,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::MissingCredential => StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::UpstreamFailure => StatusCode::BAD_GATEWAY,
            ErrorKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    /// Shorthand for an invalid request with the given message
    pub fn invalid_request(message: impl Into<String>) -> Self {
        AppError::InvalidRequest(message.into())
    }

    /// Classify this error into the public taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingCredential => ErrorKind::MissingCredential,
            AppError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            AppError::Upstream { .. } | AppError::EmptyUpstreamBody { .. } => {
                ErrorKind::UpstreamFailure
            }
            AppError::HttpError(_) | AppError::Internal(_) => ErrorKind::InternalFailure,
        }
    }

    /// Message sent to the caller
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::InternalFailure => INTERNAL_ERROR_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        if kind == ErrorKind::InternalFailure {
            error!(error = %self, "Request failed with internal error");
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (kind.status(), Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
