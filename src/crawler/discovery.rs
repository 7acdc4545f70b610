//! Seed link discovery from index pages
//!
//! Index pages are fetched concurrently; every article link they contain is
//! canonicalized, deduplicated and sorted. The first non-empty result is
//! memoized for the lifetime of the discovery instance.

use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::{fetch_politely, PageFetcher};
use crate::url::ArticleMatcher;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use url::Url;

/// Discovers and memoizes the candidate article link set
pub struct LinkDiscovery {
    fetcher: Arc<dyn PageFetcher>,
    index_urls: Vec<Url>,
    matcher: Arc<ArticleMatcher>,
    concurrency: usize,
    request_delay: Duration,

    /// Memoized link set; held across a computation so concurrent callers
    /// wait for it instead of fetching again
    links: Mutex<Arc<Vec<String>>>,
}

impl LinkDiscovery {
    /// Creates a discovery over the given index pages
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of index page HTML
    /// * `index_urls` - Index pages to read links from
    /// * `matcher` - Recognizes article URLs
    /// * `concurrency` - Maximum index fetches in flight
    /// * `request_delay` - Politeness pause after every fetch
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        index_urls: Vec<Url>,
        matcher: Arc<ArticleMatcher>,
        concurrency: usize,
        request_delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            index_urls,
            matcher,
            concurrency: concurrency.max(1),
            request_delay,
            links: Mutex::new(Arc::new(Vec::new())),
        }
    }

    /// Returns the sorted candidate article URLs
    ///
    /// A non-empty memoized set is returned without fetching unless
    /// `force_refresh` is set. An empty result is never memoized, so the
    /// next call tries again.
    pub async fn discover(&self, force_refresh: bool) -> Arc<Vec<String>> {
        let mut memo = self.links.lock().await;

        if !memo.is_empty() && !force_refresh {
            tracing::debug!("Using {} memoized seed links", memo.len());
            return Arc::clone(&memo);
        }

        let links = Arc::new(self.fetch_all().await);
        if links.is_empty() {
            tracing::warn!("Link discovery found no article links");
            // A forced refresh that came back empty keeps the old set
            if memo.is_empty() {
                return links;
            }
            return Arc::clone(&memo);
        }

        tracing::info!(
            "Discovered {} article links from {} index pages",
            links.len(),
            self.index_urls.len()
        );
        *memo = Arc::clone(&links);
        links
    }

    async fn fetch_all(&self) -> Vec<String> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set = JoinSet::new();

        for index_url in &self.index_urls {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let matcher = Arc::clone(&self.matcher);
            let index_url = index_url.clone();
            let delay = self.request_delay;

            join_set.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return BTreeSet::new();
                };

                match fetch_politely(fetcher.as_ref(), index_url.as_str(), delay).await {
                    Ok(html) => {
                        let links = extract_links(&html, &index_url, &matcher);
                        tracing::debug!("Index {} yielded {} links", index_url, links.len());
                        links
                    }
                    Err(e) => {
                        tracing::warn!("Skipping index page {}: {}", index_url, e);
                        BTreeSet::new()
                    }
                }
            });
        }

        let mut all = BTreeSet::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(links) => all.extend(links),
                Err(e) => tracing::warn!("Index fetch task failed: {}", e),
            }
        }

        all.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves canned HTML per URL and counts requests
    struct StaticFetcher {
        pages: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages.get(url).cloned().ok_or(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    const SERIES_1: &str = "https://scp-wiki.wikidot.com/scp-series";
    const SERIES_2: &str = "https://scp-wiki.wikidot.com/scp-series-2";

    fn discovery(fetcher: Arc<StaticFetcher>, index_urls: &[&str]) -> LinkDiscovery {
        LinkDiscovery::new(
            fetcher,
            index_urls.iter().map(|u| Url::parse(u).unwrap()).collect(),
            Arc::new(
                ArticleMatcher::new(r"^https://scp-wiki\.wikidot\.com/scp-\d{3,4}$").unwrap(),
            ),
            4,
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_merges_sorts_and_deduplicates() {
        let fetcher = Arc::new(StaticFetcher::new(&[
            (SERIES_1, r#"<a href="/scp-173">a</a><a href="/scp-002">b</a>"#),
            (SERIES_2, r#"<a href="/scp-1000">c</a><a href="/scp-173/">d</a>"#),
        ]));
        let links = discovery(fetcher, &[SERIES_1, SERIES_2])
            .discover(false)
            .await;

        assert_eq!(
            links.as_slice(),
            [
                "https://scp-wiki.wikidot.com/scp-002",
                "https://scp-wiki.wikidot.com/scp-1000",
                "https://scp-wiki.wikidot.com/scp-173",
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_index_contributes_nothing() {
        let fetcher = Arc::new(StaticFetcher::new(&[(
            SERIES_1,
            r#"<a href="/scp-173">a</a>"#,
        )]));
        let links = discovery(fetcher, &[SERIES_1, SERIES_2])
            .discover(false)
            .await;

        assert_eq!(links.as_slice(), ["https://scp-wiki.wikidot.com/scp-173"]);
    }

    #[tokio::test]
    async fn test_result_is_memoized() {
        let fetcher = Arc::new(StaticFetcher::new(&[(
            SERIES_1,
            r#"<a href="/scp-173">a</a>"#,
        )]));
        let discovery = discovery(Arc::clone(&fetcher), &[SERIES_1]);

        let first = discovery.discover(false).await;
        let second = discovery.discover(false).await;

        assert_eq!(first, second);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn test_force_refresh_fetches_again() {
        let fetcher = Arc::new(StaticFetcher::new(&[(
            SERIES_1,
            r#"<a href="/scp-173">a</a>"#,
        )]));
        let discovery = discovery(Arc::clone(&fetcher), &[SERIES_1]);

        discovery.discover(false).await;
        discovery.discover(true).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_memoized() {
        let fetcher = Arc::new(StaticFetcher::new(&[]));
        let discovery = discovery(Arc::clone(&fetcher), &[SERIES_1]);

        assert!(discovery.discover(false).await.is_empty());
        assert!(discovery.discover(false).await.is_empty());

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_same_input_same_output() {
        let html = r#"<a href="/scp-500">x</a><a href="/scp-049">y</a>"#;
        let a = discovery(Arc::new(StaticFetcher::new(&[(SERIES_1, html)])), &[SERIES_1])
            .discover(false)
            .await;
        let b = discovery(Arc::new(StaticFetcher::new(&[(SERIES_1, html)])), &[SERIES_1])
            .discover(false)
            .await;
        assert_eq!(a, b);
    }
}
