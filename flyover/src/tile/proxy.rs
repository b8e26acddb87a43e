//! Read-through tile proxy with stale fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::error::TileError;
use super::key::TileKey;
use super::response::{TileResponse, TileSource};
use crate::cache::{CacheRead, TileCache};
use crate::config::ConfigFile;
use crate::provider::{
    ProviderRegistry, ReqwestFetcher, TileFetcher, TransportError, DEFAULT_FETCH_TIMEOUT_SECS,
};

/// Serves tiles from the disk cache, falling back to the provider.
///
/// Order of operations for one request:
///
/// 1. Reject unknown providers before touching disk or network.
/// 2. Serve a readable cache entry as-is. There is no revalidation.
/// 3. Fetch from the provider. On 200, cache the body (best effort) and
///    serve it. Any other status is passed through.
/// 4. On a transport failure, serve whatever the cache holds, or fail.
pub struct TileProxy<F: TileFetcher> {
    registry: Arc<ProviderRegistry>,
    cache: TileCache,
    fetcher: F,
    timeout: Duration,
}

impl<F: TileFetcher> TileProxy<F> {
    /// Creates a proxy with the default 30 second fetch timeout.
    pub fn new(registry: Arc<ProviderRegistry>, cache: TileCache, fetcher: F) -> Self {
        Self {
            registry,
            cache,
            fetcher,
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the tile for `provider/z/x/y`.
    ///
    /// # Errors
    ///
    /// - [`TileError::UnknownProvider`] if `provider` is not registered
    /// - [`TileError::UpstreamStatus`] if the provider answered non-200
    /// - [`TileError::Fetch`] if the provider was unreachable and the cache
    ///   had nothing readable
    pub async fn fetch_tile(
        &self,
        provider: &str,
        z: u32,
        x: u32,
        y: u32,
    ) -> Result<TileResponse, TileError> {
        let config = self
            .registry
            .get(provider)
            .ok_or_else(|| TileError::UnknownProvider(provider.to_string()))?;
        let key = TileKey::new(provider, z, x, y);

        match self.cache.read(&key).await {
            CacheRead::Hit(data) => {
                debug!(key = %key, bytes = data.len(), "Serving tile from cache");
                return Ok(TileResponse::new(data, TileSource::Cache));
            }
            CacheRead::Miss => {}
            CacheRead::Corrupt(e) => {
                warn!(key = %key, error = %e, "Cached tile unreadable, fetching from provider");
            }
        }

        let url = config.tile_url(z, x, y);
        match self.fetcher.fetch(&url, config.headers(), self.timeout).await {
            Ok(response) if response.is_ok() => {
                info!(key = %key, bytes = response.body.len(), "Fetched tile from provider");
                if let Err(e) = self.cache.write(&key, &response.body).await {
                    warn!(key = %key, error = %e, "Tile cache write failed");
                }
                Ok(TileResponse::new(response.body, TileSource::Upstream))
            }
            Ok(response) => {
                debug!(key = %key, url = %url, status = response.status, "Provider returned error status");
                Err(TileError::UpstreamStatus(response.status))
            }
            Err(e) => match self.cache.read(&key).await {
                CacheRead::Hit(data) => {
                    warn!(key = %key, error = %e, "Provider unreachable, serving stale tile");
                    Ok(TileResponse::new(data, TileSource::Stale))
                }
                CacheRead::Miss | CacheRead::Corrupt(_) => {
                    warn!(key = %key, error = %e, "Provider unreachable and no cached tile");
                    Err(TileError::Fetch(e.to_string()))
                }
            },
        }
    }
}

impl TileProxy<ReqwestFetcher> {
    /// Builds the production proxy from loaded configuration.
    pub fn from_config(config: &ConfigFile) -> Result<Self, TransportError> {
        let registry = Arc::new(config.provider_registry());
        let cache = TileCache::new(config.cache.directory.clone());
        Ok(Self::new(registry, cache, ReqwestFetcher::new()?)
            .with_timeout(Duration::from_secs(config.download.timeout)))
    }
}
