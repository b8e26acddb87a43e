//! Remote tile provider abstraction
//!
//! This module holds the provider registry (which hosts may be contacted and
//! with which headers) and the fetch capability used to reach them.
//!
//! # Example
//!
//! ```ignore
//! use flyover::provider::{ProviderRegistry, ReqwestFetcher};
//!
//! let registry = ProviderRegistry::builtin();
//! let fetcher = ReqwestFetcher::new()?;
//! let url = registry.get("openstreetmap").unwrap().tile_url(3, 4, 2);
//! ```

mod http;
mod registry;
mod types;

pub use http::{
    FetchResponse, ReqwestFetcher, TileFetcher, TransportError, DEFAULT_FETCH_TIMEOUT_SECS,
};
pub use registry::ProviderRegistry;
pub use types::{validate_provider_name, ProviderError, TileProviderConfig, DEFAULT_USER_AGENT};

#[cfg(test)]
pub use http::tests::MockFetcher;
