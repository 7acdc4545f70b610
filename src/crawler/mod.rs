//! Crawler module for page discovery, fetching and extraction
//!
//! This module contains the crawl-side pipeline:
//! - HTTP fetching behind the `PageFetcher` trait, with a politeness pause
//! - Article and link extraction from HTML
//! - Memoized seed link discovery from index pages
//! - The bounded concurrent crawl that fills the page cache

mod discovery;
mod extractor;
mod fetcher;
mod pool;

pub use discovery::LinkDiscovery;
pub use extractor::{extract_article, extract_links, normalize_text, Article};
pub use fetcher::{build_http_client, fetch_politely, FetchError, HttpFetcher, PageFetcher};
pub use pool::{CrawlReport, Crawler};
