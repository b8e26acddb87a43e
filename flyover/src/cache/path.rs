//! Cache path construction.

use std::path::{Path, PathBuf};

use crate::tile::TileKey;

/// File extension used for cached tiles.
pub const TILE_EXTENSION: &str = "png";

/// Construct the full path for a cached tile.
///
/// Creates a hierarchical path structure:
/// ```text
/// <cache_dir>/<provider>/<z>/<x>/<y>.png
/// ```
///
/// Sibling tiles at the same `z/x` share a directory, so a whole column can
/// be enumerated or purged at once.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use flyover::cache::cache_path;
/// use flyover::tile::TileKey;
///
/// let key = TileKey::new("openstreetmap", 15, 17602, 10749);
/// let path = cache_path(&PathBuf::from("/cache"), &key);
///
/// assert_eq!(path, PathBuf::from("/cache/openstreetmap/15/17602/10749.png"));
/// ```
pub fn cache_path(cache_dir: &Path, key: &TileKey) -> PathBuf {
    column_directory(cache_dir, key).join(format!("{}.{}", key.y, TILE_EXTENSION))
}

/// Get the directory holding every tile of one `z/x` column.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use flyover::cache::column_directory;
/// use flyover::tile::TileKey;
///
/// let key = TileKey::new("terrain", 9, 270, 180);
/// let dir = column_directory(&PathBuf::from("/cache"), &key);
///
/// assert_eq!(dir, PathBuf::from("/cache/terrain/9/270"));
/// ```
pub fn column_directory(cache_dir: &Path, key: &TileKey) -> PathBuf {
    zoom_directory(cache_dir, &key.provider, key.z).join(key.x.to_string())
}

/// Get the directory holding every tile of one provider at one zoom level.
pub fn zoom_directory(cache_dir: &Path, provider: &str, z: u32) -> PathBuf {
    provider_directory(cache_dir, provider).join(z.to_string())
}

/// Get the provider directory path.
pub fn provider_directory(cache_dir: &Path, provider: &str) -> PathBuf {
    cache_dir.join(provider)
}
