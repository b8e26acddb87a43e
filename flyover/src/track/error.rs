//! Track ingestion errors.

use thiserror::Error;

/// Errors from [`parse_track`](super::parse_track).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// Input is not UTF-8 or not valid GPX.
    #[error("Failed to parse GPX file: {0}")]
    Malformed(String),

    /// The file parsed but contains no track points.
    #[error("No track points found in GPX file")]
    Empty,
}
