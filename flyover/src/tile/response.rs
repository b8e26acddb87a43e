//! Served tile types.

use std::fmt;

/// Content type reported for every tile.
pub const TILE_CONTENT_TYPE: &str = "image/png";

/// `Cache-Control` directive for fresh tiles (24 hours).
pub const FRESH_CACHE_CONTROL: &str = "public, max-age=86400";

/// Where a served tile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSource {
    /// Read from the local cache without contacting the provider.
    Cache,
    /// Fetched from the provider during this request.
    Upstream,
    /// Read from the local cache after the provider could not be reached.
    Stale,
}

impl TileSource {
    /// Browser cache directive for this source.
    ///
    /// Stale tiles get none so clients do not hold on to a fallback copy.
    pub fn cache_control(self) -> Option<&'static str> {
        match self {
            TileSource::Cache | TileSource::Upstream => Some(FRESH_CACHE_CONTROL),
            TileSource::Stale => None,
        }
    }
}

impl fmt::Display for TileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileSource::Cache => write!(f, "cache"),
            TileSource::Upstream => write!(f, "upstream"),
            TileSource::Stale => write!(f, "stale"),
        }
    }
}

/// A tile ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileResponse {
    pub data: Vec<u8>,
    pub source: TileSource,
}

impl TileResponse {
    pub fn new(data: Vec<u8>, source: TileSource) -> Self {
        Self { data, source }
    }

    pub fn content_type(&self) -> &'static str {
        TILE_CONTENT_TYPE
    }

    pub fn cache_control(&self) -> Option<&'static str> {
        self.source.cache_control()
    }
}
