//! Bounded concurrent crawl of article pages
//!
//! Every URL not yet cached gets its own task; a semaphore caps how many of
//! them are fetching (or sitting out their politeness pause) at once. The
//! crawl returns once every task has finished. Dropping the crawl future
//! drops its `JoinSet`, which aborts all in-flight workers.

use crate::crawler::extractor::extract_article;
use crate::crawler::fetcher::{fetch_politely, PageFetcher};
use crate::state::{Page, PageCache};
use crate::url::ArticleMatcher;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Counters describing one crawl call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    /// URLs handed to the crawl
    pub requested: usize,

    /// URLs dropped because they are not article URLs (or repeat one)
    pub rejected: usize,

    /// URLs skipped because they were already cached
    pub already_cached: usize,

    /// Pages fetched, extracted and inserted
    pub fetched: usize,

    /// Fetches or extractions that produced nothing
    pub failed: usize,
}

/// What happened to one dispatched URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerOutcome {
    Inserted,
    AlreadyCached,
    Failed,
}

/// Fetches and caches article pages with bounded concurrency
pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    matcher: Arc<ArticleMatcher>,
    request_delay: Duration,
}

impl Crawler {
    /// Creates a crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of page HTML
    /// * `matcher` - Only URLs it accepts are crawled
    /// * `request_delay` - Politeness pause each worker takes after a fetch
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        matcher: Arc<ArticleMatcher>,
        request_delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            matcher,
            request_delay,
        }
    }

    /// Fetches every URL of `urls` that is not yet in `cache`
    ///
    /// At most `concurrency` fetches are in flight at once. Failed URLs are
    /// left out of the cache and will be tried again by a later crawl.
    pub async fn crawl(
        &self,
        urls: &[String],
        cache: &Arc<PageCache>,
        concurrency: usize,
    ) -> CrawlReport {
        let mut report = CrawlReport {
            requested: urls.len(),
            ..CrawlReport::default()
        };

        let mut seen = HashSet::new();
        let mut pending = Vec::new();
        for url in urls {
            let Some(canonical) = self.matcher.canonical_article_str(url) else {
                tracing::debug!("Not an article URL, skipping: {}", url);
                report.rejected += 1;
                continue;
            };
            if !seen.insert(canonical.clone()) {
                report.rejected += 1;
            } else if cache.contains(&canonical) {
                report.already_cached += 1;
            } else {
                pending.push(canonical);
            }
        }

        if pending.is_empty() {
            tracing::debug!("Nothing to crawl: all {} URLs cached", report.already_cached);
            return report;
        }

        tracing::info!(
            "Crawling {} pages ({} already cached, concurrency {})",
            pending.len(),
            report.already_cached,
            concurrency
        );
        let started = Instant::now();

        let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
        let mut join_set = JoinSet::new();

        for url in pending {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let cache = Arc::clone(cache);
            let delay = self.request_delay;

            join_set.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return WorkerOutcome::Failed;
                };
                crawl_one(fetcher.as_ref(), &cache, url, delay).await
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(WorkerOutcome::Inserted) => report.fetched += 1,
                Ok(WorkerOutcome::AlreadyCached) => report.already_cached += 1,
                Ok(WorkerOutcome::Failed) => report.failed += 1,
                Err(e) => {
                    tracing::warn!("Crawl worker failed: {}", e);
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            "Crawl finished in {:?}: {} fetched, {} failed, {} pages cached",
            started.elapsed(),
            report.fetched,
            report.failed,
            cache.len()
        );

        report
    }
}

/// Fetch, extract and insert a single page
async fn crawl_one(
    fetcher: &dyn PageFetcher,
    cache: &PageCache,
    url: String,
    delay: Duration,
) -> WorkerOutcome {
    // An overlapping crawl may have cached it while this worker waited
    if cache.contains(&url) {
        return WorkerOutcome::AlreadyCached;
    }

    let html = match fetch_politely(fetcher, &url, delay).await {
        Ok(html) => html,
        Err(e) => {
            tracing::debug!("Fetch failed: {}", e);
            return WorkerOutcome::Failed;
        }
    };

    let Some(article) = extract_article(&html) else {
        tracing::debug!("No article text in {}", url);
        return WorkerOutcome::Failed;
    };

    if cache.insert(Page::new(url, article.title, article.text)) {
        WorkerOutcome::Inserted
    } else {
        WorkerOutcome::AlreadyCached
    }
}
