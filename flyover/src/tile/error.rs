//! Tile proxy errors.

use thiserror::Error;

/// Errors surfaced by [`TileProxy::fetch_tile`](super::TileProxy::fetch_tile).
///
/// Cache I/O failures are deliberately absent: they are absorbed inside the
/// proxy and never turn into a client-visible error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    /// Provider name is not in the registry. No I/O was attempted.
    #[error("Unknown tile provider")]
    UnknownProvider(String),

    /// Upstream answered with a non-200 status.
    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    /// Upstream was unreachable and no cached copy could be served.
    #[error("{0}")]
    Fetch(String),
}
