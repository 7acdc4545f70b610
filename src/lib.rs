//! scp-freq-search: frequency search over a politely crawled wiki
//!
//! This crate discovers article pages on a wiki site from a set of index
//! pages, fetches and caches their text in memory, and ranks cached pages
//! against free-text queries by literal phrase and term frequency.

pub mod config;
pub mod crawler;
pub mod output;
pub mod search;
pub mod service;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for search service operations
#[derive(Debug, Error)]
pub enum ScpSearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: state::IndexState,
        to: state::IndexState,
    },

    #[error("Crawl did not finish within {0:?}")]
    CrawlTimeout(std::time::Duration),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid article pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for search service operations
pub type Result<T> = std::result::Result<T, ScpSearchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, HttpFetcher, LinkDiscovery, PageFetcher};
pub use search::{rank, SearchResult};
pub use service::{RefreshSummary, SearchService, ServiceStatus};
pub use state::{IndexState, Page, PageCache};
