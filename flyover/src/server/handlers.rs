//! Request handlers for the two HTTP endpoints.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, info};

use super::error::UploadError;
use crate::provider::TileFetcher;
use crate::tile::{TileError, TileProxy, TileResponse};
use crate::track::{parse_track, TrackRecord};

/// Multipart field carrying the uploaded track.
pub const UPLOAD_FIELD: &str = "file";

/// Accepted upload extension, compared case-insensitively.
const GPX_EXTENSION: &str = ".gpx";

/// Shared handler state.
pub struct AppState<F: TileFetcher> {
    pub proxy: Arc<TileProxy<F>>,
}

// Derive would require `F: Clone`.
impl<F: TileFetcher> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            proxy: Arc::clone(&self.proxy),
        }
    }
}

/// `GET /tiles/:provider/:z/:x/:tile` where `tile` is `<y>.png`.
///
/// Segments are taken as strings so that malformed coordinates produce 404
/// instead of the extractor's 400.
pub async fn get_tile<F: TileFetcher + 'static>(
    State(state): State<AppState<F>>,
    Path((provider, z, x, tile)): Path<(String, String, String, String)>,
) -> Response {
    let Some((z, x, y)) = parse_coordinates(&z, &x, &tile) else {
        debug!(provider = %provider, z = %z, x = %x, tile = %tile, "Malformed tile path");
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.proxy.fetch_tile(&provider, z, x, y).await {
        Ok(tile) => tile_response(tile),
        Err(e @ TileError::UnknownProvider(_)) => {
            debug!(provider = %provider, "Unknown tile provider requested");
            e.into_response()
        }
        Err(e) => e.into_response(),
    }
}

fn parse_coordinates(z: &str, x: &str, tile: &str) -> Option<(u32, u32, u32)> {
    let y = tile.strip_suffix(".png")?;
    Some((
        parse_coordinate(z)?,
        parse_coordinate(x)?,
        parse_coordinate(y)?,
    ))
}

/// Plain decimal digits only; `u32::from_str` would also take a leading `+`.
fn parse_coordinate(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn tile_response(tile: TileResponse) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(tile.content_type()),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(tile.data.len()));
    if let Some(directive) = tile.cache_control() {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(directive));
    }
    (StatusCode::OK, headers, tile.data).into_response()
}

/// `POST /upload` with a multipart `file` field holding a GPX document.
pub async fn upload_track(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TrackRecord>, UploadError> {
    let mut multipart = multipart.map_err(|_| UploadError::NoFileProvided)?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        // A part without a filename is a plain form value, not a file.
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or(UploadError::NoFileProvided)?;
        check_filename(&filename)?;

        let data = field.bytes().await?;
        let bytes = data.len();
        let record = tokio::task::spawn_blocking(move || parse_track(&data))
            .await
            .map_err(|e| UploadError::Internal(e.to_string()))??;

        info!(
            filename = %filename,
            bytes,
            points = record.points.len(),
            "Parsed uploaded track"
        );
        return Ok(Json(record));
    }

    Err(UploadError::NoFileProvided)
}

fn check_filename(filename: &str) -> Result<(), UploadError> {
    if filename.is_empty() {
        return Err(UploadError::NoFileSelected);
    }
    if !filename.to_ascii_lowercase().ends_with(GPX_EXTENSION) {
        return Err(UploadError::InvalidFileType);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("3", "4", "5.png"), Some((3, 4, 5)));
        assert_eq!(parse_coordinates("0", "0", "0.png"), Some((0, 0, 0)));
    }

    #[test]
    fn test_parse_coordinates_rejects_malformed_segments() {
        assert_eq!(parse_coordinates("3", "4", "5.jpg"), None);
        assert_eq!(parse_coordinates("3", "4", "5"), None);
        assert_eq!(parse_coordinates("3", "4", ".png"), None);
        assert_eq!(parse_coordinates("a", "4", "5.png"), None);
        assert_eq!(parse_coordinates("3", "-4", "5.png"), None);
        assert_eq!(parse_coordinates("+3", "4", "5.png"), None);
        assert_eq!(parse_coordinates("3", "4", "99999999999.png"), None);
    }

    #[test]
    fn test_check_filename() {
        assert!(check_filename("ride.gpx").is_ok());
        assert!(check_filename("RIDE.GPX").is_ok());
        assert!(matches!(
            check_filename(""),
            Err(UploadError::NoFileSelected)
        ));
        assert!(matches!(
            check_filename("ride.kml"),
            Err(UploadError::InvalidFileType)
        ));
        assert!(matches!(
            check_filename("gpx"),
            Err(UploadError::InvalidFileType)
        ));
    }
}
