//! In-memory page cache
//!
//! The cache only grows: pages are inserted once per canonical URL and never
//! updated or evicted. Reads take a snapshot so scoring never holds the lock.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// An extracted article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Canonical article URL (identity)
    pub url: String,

    /// Page title
    pub title: String,

    /// Normalized body text
    pub text: String,
}

impl Page {
    pub fn new(url: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Thread-safe, append-only mapping from URL to page
///
/// Iteration order is ascending URL.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: RwLock<BTreeMap<String, Arc<Page>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a page keyed by its URL
    ///
    /// First writer wins: returns false and leaves the cache untouched if a
    /// page with the same URL is already present.
    pub fn insert(&self, page: Page) -> bool {
        let mut pages = self.pages.write().unwrap_or_else(PoisonError::into_inner);
        if pages.contains_key(&page.url) {
            return false;
        }
        pages.insert(page.url.clone(), Arc::new(page));
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<Arc<Page>> {
        self.pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.pages.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the pages present right now, in URL order
    pub fn snapshot(&self) -> Vec<Arc<Page>> {
        self.pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}
