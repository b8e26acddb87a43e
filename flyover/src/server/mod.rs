//! HTTP boundary.
//!
//! Two endpoints:
//!
//! - `GET /tiles/:provider/:z/:x/:y.png` serves map tiles through [`TileProxy`]
//! - `POST /upload` parses a multipart GPX upload into a [`TrackRecord`]
//!
//! [`TrackRecord`]: crate::track::TrackRecord

mod error;
mod handlers;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ConfigFile;
use crate::provider::{TileFetcher, TransportError};
use crate::tile::TileProxy;

pub use error::{json_error, UploadError};
pub use handlers::{get_tile, upload_track, AppState, UPLOAD_FIELD};

/// Server startup and runtime errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] TransportError),

    #[error("Server error: {0}")]
    Serve(#[source] io::Error),
}

/// Build the application router.
///
/// `max_upload_size` caps request bodies; larger uploads are rejected with
/// 413 while the multipart stream is read.
pub fn router<F: TileFetcher + 'static>(
    proxy: Arc<TileProxy<F>>,
    max_upload_size: usize,
) -> Router {
    Router::new()
        .route("/tiles/:provider/:z/:x/:tile", get(get_tile::<F>))
        .route("/upload", post(upload_track))
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { proxy })
}

/// Serve `router` on an already-bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, router: Router) -> Result<(), ServerError> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn run(config: &ConfigFile) -> Result<(), ServerError> {
    let proxy = Arc::new(TileProxy::from_config(config)?);
    let addr = config.server.bind;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(
        addr = %addr,
        cache_dir = %config.cache.directory.display(),
        providers = proxy.registry().names().count(),
        timeout_secs = config.download.timeout,
        "Flyover server listening"
    );

    serve(listener, router(proxy, config.server.max_upload_size)).await?;
    info!("Flyover server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, shutting down");
    }
}
