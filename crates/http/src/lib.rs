//! # sortable-http
//!
//! HTTP client for fetching workbook files.
//!
//! Every request bypasses intermediate caches so a table always renders the
//! current version of its file. HTTP/2 is negotiated via ALPN with fallback
//! to HTTP/1.1.

use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while fetching.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: StatusCode },
}

/// Result type for HTTP operations.
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP client for file fetching.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Constructs a client with a 30-second timeout and no system proxy lookup.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Client` if building the underlying client fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortable_http::HttpClient;
    /// let client = HttpClient::new().expect("failed to create HttpClient");
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_timeout(30)
    }

    /// Constructs a client with a custom per-request timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Client` if building the underlying client fails.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(HttpError::Client)?;

        Ok(Self { client })
    }

    /// Fetch the body of `url` as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Request` if the request or body read fails and
    /// `HttpError::Status` for any non-success status.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "fetching");

        let request_error = |source: reqwest::Error| HttpError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        tracing::debug!(url, %status, bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }
}
