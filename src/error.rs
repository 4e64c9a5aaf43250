//! Request-level error taxonomy
//!
//! Client mistakes are 400 plain text, conversion failures are 500 with the
//! codec diagnostic, everything else is a 500 whose detail only goes to the log.

use crate::audio::ConversionError;
use crate::prompts::PromptError;
use crate::storage::StorageError;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RecorderError {
    /// Missing or malformed request data (400)
    #[error("{0}")]
    BadRequest(String),

    /// Unreadable multipart body, including bodies over the size limit
    #[error("Invalid upload body: {0}")]
    Multipart(#[from] MultipartError),

    /// Raw upload could not be converted (500, diagnostic shown to the client)
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Prompts(#[from] PromptError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RecorderError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for RecorderError {
    fn into_response(self) -> Response {
        match self {
            RecorderError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            RecorderError::Multipart(err) => err.into_response(),
            RecorderError::Storage(StorageError::InvalidName { kind, .. }) => {
                (StatusCode::BAD_REQUEST, format!("Invalid {}", kind)).into_response()
            }
            RecorderError::Conversion(_) => {
                let message = self.to_string();
                error!("{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            RecorderError::Prompts(_) | RecorderError::Storage(StorageError::Io(_)) => {
                error!("Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// Result type for request handlers
pub type RecorderResult<T> = Result<T, RecorderError>;
