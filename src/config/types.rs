use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the frequency search service
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub discovery: DiscoveryConfig,
    pub search: SearchConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of fetches in flight at once
    pub concurrency: usize,

    /// Pause each worker takes after every fetch attempt (milliseconds)
    pub request_delay_ms: u64,

    /// Total request timeout (seconds)
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    pub connect_timeout_secs: u64,

    /// Pages fetched by the implicit bootstrap of the first search
    pub bootstrap_pages: usize,

    /// Upper bound accepted for an explicit refresh
    pub max_refresh_pages: usize,
}

impl CrawlerConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            request_delay_ms: 800,
            timeout_secs: 20,
            connect_timeout_secs: 10,
            bootstrap_pages: 250,
            max_refresh_pages: 3000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Renders the identity string sent with every request
    ///
    /// Format: `Mozilla/5.0 (compatible; name/version; +contact-url)`
    pub fn header_value(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{}; +{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "scp-freq-bot".to_string(),
            crawler_version: "0.1".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        }
    }
}

/// Seed link discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiscoveryConfig {
    /// Index pages enumerating article links
    pub index_urls: Vec<String>,

    /// Regular expression a canonical article URL must match in full
    pub article_pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            index_urls: vec![
                "https://scp-wiki.wikidot.com/scp-series".to_string(),
                "https://scp-wiki.wikidot.com/scp-series-2".to_string(),
                "https://scp-wiki.wikidot.com/scp-series-3".to_string(),
            ],
            article_pattern: r"^https://scp-wiki\.wikidot\.com/scp-\d{3,4}$".to_string(),
        }
    }
}

/// Query-time configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    /// Total character budget of a result snippet
    pub snippet_length: usize,

    /// Result limit used when the caller gives none
    pub default_limit: usize,

    /// Largest result limit a caller may request
    pub max_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            snippet_length: 240,
            default_limit: 25,
            max_limit: 100,
        }
    }
}
