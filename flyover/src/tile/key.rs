//! Tile cache key.

use std::fmt;

/// Identifies one tile from one provider.
///
/// Keys are only built after the provider name has been resolved against the
/// [`ProviderRegistry`](crate::provider::ProviderRegistry), so the provider
/// segment is always a registered, path-safe name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub provider: String,
    pub z: u32,
    pub x: u32,
    pub y: u32,
}

impl TileKey {
    pub fn new(provider: impl Into<String>, z: u32, x: u32, y: u32) -> Self {
        Self {
            provider: provider.into(),
            z,
            x,
            y,
        }
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.provider, self.z, self.x, self.y)
    }
}
