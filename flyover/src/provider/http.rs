//! Fetch capability abstraction for testability
//!
//! The tile proxy never talks to `reqwest` directly. It goes through
//! [`TileFetcher`], so tests can substitute counting or failing fakes.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace, warn};

/// Default per-fetch timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Transport-level failure: timeout, DNS, connection reset, truncated body.
///
/// A non-200 status is *not* a transport failure; it arrives as a
/// [`FetchResponse`] with that status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Response from the fetch capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body. Only read for status 200.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// A 200 response with the given body.
    pub fn ok(body: Vec<u8>) -> Self {
        Self { status: 200, body }
    }

    /// A bodyless response with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for fetching remote tiles.
///
/// # Arguments
///
/// * `url` - Fully substituted tile URL
/// * `headers` - Provider's outbound request headers
/// * `timeout` - Upper bound on the whole request
pub trait TileFetcher: Send + Sync {
    fn fetch(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> impl Future<Output = Result<FetchResponse, TransportError>> + Send;
}

/// Real fetcher implementation using reqwest.
///
/// Holds a single pooled client; the timeout is applied per request.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Creates a new fetcher with a shared connection pool.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            // Connection pooling - tile requests for one view arrive in bursts
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| TransportError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl TileFetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<FetchResponse, TransportError> {
        trace!(url = url, "HTTP GET request starting");

        let mut request = self.client.get(url).timeout(timeout);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = match request.send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(TransportError(format!("Request failed: {}", e)));
            }
        };

        let status = response.status().as_u16();
        if status != 200 {
            return Ok(FetchResponse::status(status));
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(FetchResponse::ok(bytes.to_vec()))
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(TransportError(format!("Failed to read response: {}", e)))
            }
        }
    }
}
