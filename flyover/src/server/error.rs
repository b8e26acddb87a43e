//! HTTP error mapping.
//!
//! Every error body is `{"error": "<message>"}`; the status code is the only
//! machine-readable signal.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::tile::TileError;
use crate::track::TrackError;

/// Errors from `POST /upload`.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Request has no `file` field (or is not multipart at all).
    #[error("No file provided")]
    NoFileProvided,

    /// The `file` field has an empty filename.
    #[error("No file selected")]
    NoFileSelected,

    /// Filename does not end in `.gpx`.
    #[error("File must be a GPX file")]
    InvalidFileType,

    /// Multipart stream could not be read (truncated, over the size limit).
    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    /// File content is not a usable track.
    #[error(transparent)]
    Track(#[from] TrackError),

    /// Parser task failed to complete.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::Multipart(e) => e.status(),
            UploadError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "Track upload failed");
        }
        json_error(status, &self.to_string())
    }
}

impl TileError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            TileError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            TileError::UpstreamStatus(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            TileError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TileError {
    fn into_response(self) -> Response {
        match self {
            // Passed through bare, like the upstream's own answer
            TileError::UpstreamStatus(_) => self.status().into_response(),
            _ => json_error(self.status(), &self.to_string()),
        }
    }
}

/// Build a `{"error": message}` response.
pub fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
