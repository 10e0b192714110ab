use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Request-level errors, translated into the plain-text responses the upload
/// form displays verbatim.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing `file` field, empty filename, or a name that sanitizes away.
    #[error("No valid file provided.")]
    NoValidFile,

    /// Extension missing or outside the allow-set.
    #[error("File type not allowed.")]
    FileTypeNotAllowed,

    /// Upload exceeds the configured size cap.
    #[error("File too large.")]
    FileTooLarge,

    /// Malformed multipart body or other client-side protocol error.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Storage-layer failure. Logged in full server-side, short detail only
    /// in the response body. Never retried.
    #[error("Error uploading file: {0}")]
    Storage(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Storage(e) => {
                tracing::error!("Storage upload failed: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            other => {
                tracing::warn!("Upload rejected: {}", other);
                StatusCode::BAD_REQUEST
            }
        };

        (status, self.to_string()).into_response()
    }
}
