//! The long-lived search service
//!
//! `SearchService` owns everything that lives for the whole process: the
//! configuration, link discovery, the crawler, the page cache and the index
//! lifecycle state. Callers (the CLI, or any HTTP layer) hold one instance
//! and drive it through `discover_links`, `refresh`, `search` and `status`.

use crate::config::{validate, Config};
use crate::crawler::{CrawlReport, Crawler, HttpFetcher, LinkDiscovery, PageFetcher};
use crate::search::{rank, SearchResult};
use crate::state::{IndexState, PageCache};
use crate::url::ArticleMatcher;
use crate::{ScpSearchError, UrlError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

/// Outcome of a refresh (explicit or bootstrap)
#[derive(Debug, Clone, Serialize)]
pub struct RefreshSummary {
    /// Size of the discovered link set
    pub seed_links: usize,
    /// Cache size after the crawl
    pub pages_cached: usize,
    /// Counters of the crawl itself
    pub crawl: CrawlReport,
}

/// Health/status snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub state: IndexState,
    pub pages_cached: usize,
    pub links_cached: usize,
    pub last_refresh: Option<DateTime<Utc>>,
}

/// Single owner of the crawl-and-index pipeline
pub struct SearchService {
    config: Config,
    discovery: LinkDiscovery,
    crawler: Crawler,
    cache: Arc<PageCache>,

    /// Observable lifecycle state
    state: RwLock<IndexState>,
    /// Serializes every discovery/crawl pass
    lifecycle: Mutex<()>,
    /// Set once the first pass has completed
    initialized: AtomicBool,
    links_cached: AtomicUsize,
    last_refresh: RwLock<Option<DateTime<Utc>>>,
}

impl SearchService {
    /// Creates a service that fetches over HTTP
    pub fn new(config: Config) -> Result<Self, ScpSearchError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a service on top of any page source
    pub fn with_fetcher(
        config: Config,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self, ScpSearchError> {
        validate(&config)?;

        let matcher = Arc::new(ArticleMatcher::new(&config.discovery.article_pattern)?);
        let index_urls = config
            .discovery
            .index_urls
            .iter()
            .map(|u| Url::parse(u).map_err(|e| UrlError::Parse(format!("{}: {}", u, e))))
            .collect::<Result<Vec<_>, _>>()?;

        let discovery = LinkDiscovery::new(
            Arc::clone(&fetcher),
            index_urls,
            Arc::clone(&matcher),
            config.crawler.concurrency,
            config.crawler.request_delay(),
        );
        let crawler = Crawler::new(fetcher, matcher, config.crawler.request_delay());

        Ok(Self {
            config,
            discovery,
            crawler,
            cache: Arc::new(PageCache::new()),
            state: RwLock::new(IndexState::Uninitialized),
            lifecycle: Mutex::new(()),
            initialized: AtomicBool::new(false),
            links_cached: AtomicUsize::new(0),
            last_refresh: RwLock::new(None),
        })
    }

    pub fn cache(&self) -> &Arc<PageCache> {
        &self.cache
    }

    pub fn state(&self) -> IndexState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the candidate article links, fetching index pages if needed
    ///
    /// Waits for any running bootstrap or refresh, so index fetches never
    /// add to a crawl's in-flight requests.
    pub async fn discover_links(&self, force_refresh: bool) -> Arc<Vec<String>> {
        let _lifecycle = self.lifecycle.lock().await;
        self.discover_locked(force_refresh).await
    }

    /// Discovery for a caller already holding the lifecycle lock
    async fn discover_locked(&self, force_refresh: bool) -> Arc<Vec<String>> {
        let links = self.discovery.discover(force_refresh).await;
        self.links_cached.store(links.len(), Ordering::Relaxed);
        links
    }

    /// Discovers links and crawls the first `max_pages` of them
    ///
    /// `max_pages` is clamped to `1..=max-refresh-pages`.
    pub async fn refresh(
        &self,
        max_pages: usize,
        force_discovery: bool,
    ) -> Result<RefreshSummary, ScpSearchError> {
        let max_pages = max_pages.clamp(1, self.config.crawler.max_refresh_pages);
        let _lifecycle = self.lifecycle.lock().await;
        self.run_pass(max_pages, force_discovery).await
    }

    /// Like `refresh`, but cancels the whole pass after `timeout`
    ///
    /// Pages inserted before the deadline stay cached.
    pub async fn refresh_with_timeout(
        &self,
        max_pages: usize,
        force_discovery: bool,
        timeout: Duration,
    ) -> Result<RefreshSummary, ScpSearchError> {
        tokio::time::timeout(timeout, self.refresh(max_pages, force_discovery))
            .await
            .map_err(|_| ScpSearchError::CrawlTimeout(timeout))?
    }

    /// Ranks cached pages against `query`
    ///
    /// The first search on an uninitialized service bootstraps the cache with
    /// a bounded crawl and waits for it; this happens at most once, even if
    /// the bootstrap finds nothing. `limit` defaults to `default-limit` and is
    /// clamped to `1..=max-limit`.
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>, ScpSearchError> {
        if query.trim().is_empty() {
            tracing::debug!("Ignoring blank query");
            return Ok(Vec::new());
        }

        self.ensure_bootstrapped().await?;

        let limit = limit
            .unwrap_or(self.config.search.default_limit)
            .clamp(1, self.config.search.max_limit);
        let results = rank(&self.cache, query, limit, self.config.search.snippet_length);

        tracing::info!(
            "Query {:?} matched {} pages (limit {})",
            query,
            results.len(),
            limit
        );
        Ok(results)
    }

    /// Current health snapshot
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            state: self.state(),
            pages_cached: self.cache.len(),
            links_cached: self.links_cached.load(Ordering::Relaxed),
            last_refresh: *self
                .last_refresh
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }

    async fn ensure_bootstrapped(&self) -> Result<(), ScpSearchError> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        let _lifecycle = self.lifecycle.lock().await;
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        tracing::info!(
            "Cache not initialized, bootstrapping with up to {} pages",
            self.config.crawler.bootstrap_pages
        );
        self.run_pass(self.config.crawler.bootstrap_pages, false)
            .await?;
        Ok(())
    }

    /// One discovery + crawl pass; the caller holds the lifecycle lock
    async fn run_pass(
        &self,
        max_pages: usize,
        force_discovery: bool,
    ) -> Result<RefreshSummary, ScpSearchError> {
        let previous = self.state();
        self.transition(IndexState::Discovering)?;
        let mut guard = TransitionGuard {
            state: &self.state,
            restore: previous,
            armed: true,
        };

        let links = self.discover_locked(force_discovery).await;
        let batch = &links[..links.len().min(max_pages)];
        let crawl = self
            .crawler
            .crawl(batch, &self.cache, self.config.crawler.concurrency)
            .await;

        guard.armed = false;
        self.transition(IndexState::Ready)?;
        self.initialized.store(true, Ordering::Release);
        *self
            .last_refresh
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());

        Ok(RefreshSummary {
            seed_links: links.len(),
            pages_cached: self.cache.len(),
            crawl,
        })
    }

    fn transition(&self, to: IndexState) -> Result<(), ScpSearchError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.can_transition_to(to) {
            return Err(ScpSearchError::InvalidTransition { from: *state, to });
        }
        tracing::debug!("Index state {} -> {}", *state, to);
        *state = to;
        Ok(())
    }
}

/// Puts the state back if a pass is dropped before it completes
struct TransitionGuard<'a> {
    state: &'a RwLock<IndexState>,
    restore: IndexState,
    armed: bool,
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("Crawl pass interrupted, index state back to {}", self.restore);
            *self.state.write().unwrap_or_else(PoisonError::into_inner) = self.restore;
        }
    }
}
