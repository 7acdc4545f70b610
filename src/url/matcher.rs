use crate::url::normalize::canonicalize;
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Recognizes article URLs by matching their canonical form against a pattern
///
/// The pattern is matched against the whole canonical URL string, so it
/// should be anchored (`^...$`) to reject longer paths such as
/// `/scp-173/comments`.
#[derive(Debug, Clone)]
pub struct ArticleMatcher {
    pattern: Regex,
}

impl ArticleMatcher {
    /// Compiles a matcher from a regular expression
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))?;
        Ok(Self { pattern })
    }

    /// Returns true if the URL, taken as is, is an article URL
    pub fn is_article(&self, url: &Url) -> bool {
        self.pattern.is_match(url.as_str())
    }

    /// Canonicalizes the URL and returns it if it is an article URL
    ///
    /// # Examples
    ///
    /// ```
    /// use scp_freq_search::url::ArticleMatcher;
    /// use url::Url;
    ///
    /// let matcher = ArticleMatcher::new(r"^https://scp-wiki\.wikidot\.com/scp-\d{3,4}$").unwrap();
    /// let url = Url::parse("https://scp-wiki.wikidot.com/scp-173/").unwrap();
    /// assert_eq!(
    ///     matcher.canonical_article(url).as_deref(),
    ///     Some("https://scp-wiki.wikidot.com/scp-173")
    /// );
    /// ```
    pub fn canonical_article(&self, url: Url) -> Option<String> {
        let canonical = canonicalize(url).ok()?;
        self.is_article(&canonical).then(|| canonical.into())
    }

    /// Parses, canonicalizes and matches a URL string
    pub fn canonical_article_str(&self, url: &str) -> Option<String> {
        Url::parse(url.trim())
            .ok()
            .and_then(|url| self.canonical_article(url))
    }
}
