//! Disk-backed tile cache.
//!
//! The cache is a plain directory tree keyed by provider, zoom and column,
//! with one file per tile row. Bytes are stored exactly as the provider sent
//! them.
//!
//! ```text
//! <cache_dir>/
//!   openstreetmap/
//!     15/
//!       17602/
//!         10749.png
//!         10750.png
//! ```
//!
//! Reads return a [`CacheRead`] that separates a clean miss from an entry
//! that exists but cannot be read. The tile proxy treats both the same way;
//! the distinction exists for logging and tests.

mod disk;
mod path;
mod types;

pub use disk::TileCache;
pub use path::{cache_path, column_directory, provider_directory, zoom_directory, TILE_EXTENSION};
pub use types::{CacheError, CacheRead};
