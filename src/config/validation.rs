use crate::config::types::{
    Config, CrawlerConfig, DiscoveryConfig, SearchConfig, UserAgentConfig,
};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_discovery_config(&config.discovery)?;
    validate_search_config(&config.search)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be at least 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and timeout_secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_refresh_pages < 1 {
        return Err(ConfigError::Validation(
            "max_refresh_pages must be >= 1".to_string(),
        ));
    }

    if config.bootstrap_pages > config.max_refresh_pages {
        return Err(ConfigError::Validation(format!(
            "bootstrap_pages ({}) cannot exceed max_refresh_pages ({})",
            config.bootstrap_pages, config.max_refresh_pages
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates index pages and the article pattern
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.index_urls.is_empty() {
        return Err(ConfigError::Validation(
            "at least one index URL is required".to_string(),
        ));
    }

    for index in &config.index_urls {
        let url = Url::parse(index).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid index URL '{}': {}", index, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Index URL '{}' must use HTTP or HTTPS",
                index
            )));
        }
    }

    Regex::new(&config.article_pattern).map_err(|e| {
        ConfigError::InvalidPattern(format!("'{}': {}", config.article_pattern, e))
    })?;

    Ok(())
}

/// Validates query-time settings
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.snippet_length < 16 {
        return Err(ConfigError::Validation(format!(
            "snippet_length must be >= 16, got {}",
            config.snippet_length
        )));
    }

    if config.max_limit < 1 {
        return Err(ConfigError::Validation("max_limit must be >= 1".to_string()));
    }

    if config.default_limit < 1 || config.default_limit > config.max_limit {
        return Err(ConfigError::Validation(format!(
            "default_limit must be between 1 and max_limit ({}), got {}",
            config.max_limit, config.default_limit
        )));
    }

    Ok(())
}
