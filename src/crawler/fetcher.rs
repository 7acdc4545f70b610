//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building an HTTP client with the configured identity and timeouts
//! - Single GET requests with error classification (no retries)
//! - The per-worker politeness pause that follows every fetch attempt

use crate::config::{CrawlerConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Reasons a fetch produced no usable HTML
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned an empty body")]
    EmptyBody { url: String },

    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },
}

/// Source of raw page HTML
///
/// The crawler and link discovery only depend on this trait, so any
/// implementation (the HTTP one below, or an in-memory one in tests) can
/// drive them.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a URL and returns its HTML
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The identity sent with every request
/// * `crawler` - Supplies the request and connect timeouts
///
/// # Example
///
/// ```no_run
/// use scp_freq_search::config::{CrawlerConfig, UserAgentConfig};
/// use scp_freq_search::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(crawler.timeout())
        .connect_timeout(crawler.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP with a shared client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, crawler)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL with a single GET
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx with non-empty body | HTML |
    /// | Non-2xx status | `Status` |
    /// | 2xx with empty body | `EmptyBody` |
    /// | Timeout | `Timeout` |
    /// | Any other transport error | `Transport` |
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| classify(url, e))?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        Ok(body)
    }
}

fn classify(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// Fetches a URL, then pauses for `delay` whatever the outcome
///
/// The pause belongs to the calling worker, so with N workers the origin
/// sees at most roughly N requests per `delay`.
pub async fn fetch_politely(
    fetcher: &dyn PageFetcher,
    url: &str,
    delay: Duration,
) -> Result<String, FetchError> {
    let result = fetcher.fetch(url).await;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    result
}
