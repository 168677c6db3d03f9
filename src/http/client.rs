//! HTTP client for fetching endpoint responses
//!
//! Wraps a `reqwest::Client` and handles:
//! - Fixed request headers (user agent only)
//! - URL validation before sending
//! - Reading the full response body as text
//! - Error classification for non-2xx responses

use crate::error::{Error, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// User agent sent with every request; some APIs reject requests without one
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Configuration for the HTTP client
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Request timeout (None = reqwest default, i.e. no overall timeout)
    pub timeout: Option<Duration>,
    /// Keep idle connections for reuse across requests
    pub reuse_connections: bool,
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the request timeout in seconds, if any
    pub fn timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.config.timeout = secs.map(Duration::from_secs);
        self
    }

    /// Keep idle connections open between requests
    pub fn reuse_connections(mut self, reuse: bool) -> Self {
        self.config.reuse_connections = reuse;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client for GET requests returning text bodies
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        // Without reuse every request gets its own connection, closed once
        // the body has been read or the response dropped.
        if !config.reuse_connections {
            builder = builder.pool_max_idle_per_host(0);
        }

        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Make a GET request
    ///
    /// Succeeds only for 2xx responses. Any other status is returned as
    /// `Error::HttpStatus` carrying the response body.
    pub async fn get(&self, url: &str) -> Result<Response> {
        let parsed = Url::parse(url)?;

        let response = self.client.get(parsed).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: GET {url} ({})", status.as_u16());
        Ok(response)
    }

    /// Make a GET request and read the whole body as text
    ///
    /// Line separators in the body are preserved.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        let body = response.text().await?;
        Ok(body)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("user_agent", &USER_AGENT)
            .finish_non_exhaustive()
    }
}
