//! Map tile cache/proxy.
//!
//! [`TileProxy`] ties together the [provider registry](crate::provider),
//! the [disk cache](crate::cache) and an injected
//! [`TileFetcher`](crate::provider::TileFetcher).
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use flyover::cache::TileCache;
//! use flyover::provider::{ProviderRegistry, ReqwestFetcher};
//! use flyover::tile::TileProxy;
//!
//! let proxy = TileProxy::new(
//!     Arc::new(ProviderRegistry::builtin()),
//!     TileCache::new("tile_cache"),
//!     ReqwestFetcher::new()?,
//! );
//! let tile = proxy.fetch_tile("openstreetmap", 3, 4, 2).await?;
//! ```

mod error;
mod key;
mod proxy;
mod response;

pub use error::TileError;
pub use key::TileKey;
pub use proxy::TileProxy;
pub use response::{TileResponse, TileSource, FRESH_CACHE_CONTROL, TILE_CONTENT_TYPE};
