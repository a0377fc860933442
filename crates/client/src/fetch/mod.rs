//! HTTP fetch collaborator backed by reqwest.
//!
//! ### Semantics
//! - Transport failures (DNS, refused connection, timeout) and oversize
//!   bodies are fetch errors.
//! - An HTTP error status is NOT a fetch error: a 404 is still a
//!   response, and the caching strategies treat it as content.
//! - `FetchOptions::bypass()` forces revalidation with the origin server
//!   by disabling intermediate HTTP caches for the request.
//!
//! ### Limits
//! - Max redirects and max body bytes come from [`FetchConfig`].

pub mod url;

use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, canonicalize, resolve_asset, same_origin};

use strata_core::{Error, FetchOptions, NetworkFetch, ProxyConfig, Request, Snapshot};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "strata/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "strata/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

impl FetchConfig {
    /// Derive fetch settings from the proxy configuration.
    pub fn from_config(config: &ProxyConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        }
    }
}

/// HTTP fetch client implementing the [`NetworkFetch`] collaborator.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl NetworkFetch for FetchClient {
    async fn fetch(&self, request: &Request, options: FetchOptions) -> Result<Snapshot, Error> {
        let start = Instant::now();

        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| Error::Network(format!("unsupported method: {}", request.method)))?;

        // Canonical form keeps what we fetch aligned with what we key on.
        let url = canonicalize(request.url.as_str()).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let mut builder = self.http.request(method, url.as_str());

        if let Some(accept) = &request.accept {
            builder = builder.header(header::ACCEPT, accept);
        }

        if options.bypass_http_cache {
            builder = builder
                .header(header::CACHE_CONTROL, "no-store")
                .header(header::PRAGMA, "no-cache");
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::FetchTimeout(format!("{}: {}", request.url, e))
            } else {
                Error::Network(format!("{}: {}", request.url, e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();

        if let Some(len) = response.content_length() {
            if len as usize > self.config.max_bytes {
                return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!(
                "{} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let header_pairs = headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} bytes)",
            request.url,
            status.as_u16(),
            fetch_ms,
            bytes.len()
        );

        Ok(Snapshot {
            status: status.as_u16(),
            content_type,
            headers: header_pairs,
            body: bytes.to_vec(),
            fetched_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
