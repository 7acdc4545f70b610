//! Integration tests for the crawl-and-index pipeline
//!
//! These tests use wiremock to stand in for the wiki and drive the full
//! discover → crawl → search cycle end-to-end.

mod crawl_tests;
mod search_tests;

use scp_freq_search::config::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
pub fn create_test_config(base_url: &str, index_paths: &[&str]) -> Config {
    let mut config = Config::default();
    config.crawler.concurrency = 4;
    config.crawler.request_delay_ms = 10; // Very short for testing
    config.crawler.timeout_secs = 5;
    config.crawler.connect_timeout_secs = 2;
    config.crawler.bootstrap_pages = 10;
    config.discovery.index_urls = index_paths
        .iter()
        .map(|p| format!("{}{}", base_url, p))
        .collect();
    config.discovery.article_pattern =
        format!(r"^{}/scp-\d{{3,4}}$", regex::escape(base_url));
    config
}

/// Wraps article body HTML in a wiki-like page
pub fn article_html(title: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{title} - SCP Foundation</title></head><body>
        <div id="header">SCP Foundation</div>
        <div id="side-bar"><a href="/scp-series">Series I</a></div>
        <div id="main-content">
            <div id="page-title">{title}</div>
            <div id="page-content">
                <div class="page-rate-widget-box">rating: +1234</div>
                {body}
                <div class="footer-wikiwalk-nav">« prev | next »</div>
            </div>
            <div class="page-tags"><a href="/system:page-tags/tag/keter">keter</a></div>
        </div>
        </body></html>"#
    )
}

/// Mounts a GET mock answering `path` with HTML
pub async fn mount_html(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}
