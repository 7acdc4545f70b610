//! HTML extraction for article pages and index pages
//!
//! This module handles parsing HTML content to extract:
//! - The article title and normalized body text
//! - Candidate article links from an index page

use crate::url::ArticleMatcher;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Title and body text extracted from an article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub text: String,
}

/// One way of locating the primary content container
#[derive(Debug, Clone, Copy)]
enum ContentStrategy {
    /// First element matching a CSS selector
    Selector(&'static str),
    /// The document body (or the root when there is none)
    WholeDocument,
}

/// Content strategies, tried in order; the first non-empty text wins
const CONTENT_STRATEGIES: &[ContentStrategy] = &[
    ContentStrategy::Selector("#page-content"),
    ContentStrategy::Selector("div.content"),
    ContentStrategy::WholeDocument,
];

/// Title sources, tried in order
const TITLE_SELECTORS: &[&str] = &["#page-title", "title"];

/// Wiki chrome removed before any text is read
const CHROME_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    ".page-rate-widget-box",
    ".rate-box-with-credit-button",
    ".creditRate",
    ".page-tags",
    "#page-info",
    "#page-options-container",
    "#page-options-bottom",
    "#action-area",
    "#discuss-button",
    ".footer-wikiwalk-nav",
    ".licensebox",
    "#breadcrumbs",
    "#navi-bar",
    "#side-bar",
    "#top-bar",
    "#header",
    "#footer",
    "nav",
];

/// Elements whose boundaries end a line of text
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "table",
    "blockquote", "pre", "hr", "section", "article", "dd", "dt",
];

/// Extracts the title and normalized body text of an article page
///
/// Returns `None` when no strategy produces any text.
///
/// # Example
///
/// ```
/// use scp_freq_search::crawler::extract_article;
///
/// let html = r#"<html><head><title>SCP-173</title></head>
///     <body><div id="page-content"><p>Item #: SCP-173</p></div></body></html>"#;
/// let article = extract_article(html).unwrap();
/// assert_eq!(article.title, "SCP-173");
/// assert_eq!(article.text, "Item #: SCP-173");
/// ```
pub fn extract_article(html: &str) -> Option<Article> {
    let mut document = Html::parse_document(html);

    // Title first: #page-title sits next to the chrome that gets stripped
    let title = extract_title(&document);

    strip_chrome(&mut document);

    let text = CONTENT_STRATEGIES
        .iter()
        .filter_map(|strategy| content_text(&document, *strategy))
        .find(|text| !text.is_empty())?;

    Some(Article { title, text })
}

/// Extracts every article link of an index page
///
/// Relative hrefs are resolved against `base_url`; results are canonical,
/// deduplicated and sorted.
pub fn extract_links(html: &str, base_url: &Url, matcher: &ArticleMatcher) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(article) =
                    resolve_link(href, base_url).and_then(|url| matcher.canonical_article(url))
                {
                    links.insert(article);
                }
            }
        }
    }

    links
}

fn extract_title(document: &Html) -> String {
    TITLE_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .filter_map(|selector| {
            document
                .select(&selector)
                .next()
                .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        })
        .find(|title| !title.is_empty())
        .unwrap_or_default()
}

fn strip_chrome(document: &mut Html) {
    for selector in CHROME_SELECTORS.iter().filter_map(|s| Selector::parse(s).ok()) {
        let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
        for id in ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }
    }
}

fn content_text(document: &Html, strategy: ContentStrategy) -> Option<String> {
    let container = match strategy {
        ContentStrategy::Selector(css) => {
            let selector = Selector::parse(css).ok()?;
            document.select(&selector).next()?
        }
        ContentStrategy::WholeDocument => Selector::parse("body")
            .ok()
            .and_then(|selector| document.select(&selector).next())
            .unwrap_or_else(|| document.root_element()),
    };

    let mut raw = String::new();
    collect_text(container, &mut raw);
    Some(normalize_text(&raw))
}

/// Appends the text under `element`, breaking lines at block boundaries
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let block = BLOCK_ELEMENTS.contains(&child_element.value().name());
            if block {
                out.push('\n');
            }
            collect_text(child_element, out);
            if block {
                out.push('\n');
            }
        }
    }
}

/// Normalizes extracted text
///
/// - CRLF and lone CR become LF
/// - Trailing whitespace is trimmed from every line
/// - Runs of two or more blank lines collapse to a single blank line
/// - Leading and trailing whitespace of the whole text is removed
pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());
    let mut blank_run = 0usize;

    for line in unified.split('\n') {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            out.push('\n');
        } else {
            blank_run = 0;
            out.push_str(line);
            out.push('\n');
        }
    }

    out.trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    base_url.join(href).ok()
}
