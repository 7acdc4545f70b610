use crate::{article_html, create_test_config, mount_html};
use scp_freq_search::SearchService;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_discovery_merges_index_pages_and_skips_failures() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/scp-series",
        format!(
            r#"<html><body>
            <a href="/scp-002">SCP-002</a>
            <a href="{}/scp-001">SCP-001</a>
            <a href="/scp-series-2">Series II</a>
            <a href="https://elsewhere.test/scp-003">Elsewhere</a>
            </body></html>"#,
            base_url
        ),
    )
    .await;

    mount_html(
        &mock_server,
        "/scp-series-2",
        r#"<html><body><a href="/scp-1000/">SCP-1000</a><a href="/scp-002#top">dup</a></body></html>"#
            .to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/scp-series-3"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &base_url,
        &["/scp-series", "/scp-series-2", "/scp-series-3"],
    );
    let service = SearchService::new(config).expect("Failed to create service");

    let links = service.discover_links(false).await;
    assert_eq!(
        links.as_slice(),
        [
            format!("{}/scp-001", base_url),
            format!("{}/scp-002", base_url),
            format!("{}/scp-1000", base_url),
        ]
    );

    // Memoized: a second call returns the same set
    let again = service.discover_links(false).await;
    assert_eq!(links, again);
    assert_eq!(service.status().links_cached, 3);
}

#[tokio::test]
async fn test_refresh_caches_extracted_articles() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/scp-series",
        r#"<a href="/scp-173">173</a><a href="/scp-049">049</a><a href="/scp-404">404</a>"#
            .to_string(),
    )
    .await;
    mount_html(
        &mock_server,
        "/scp-173",
        article_html("SCP-173", "<p>Item #: SCP-173</p><p>Object Class: Euclid</p>"),
    )
    .await;
    mount_html(
        &mock_server,
        "/scp-049",
        article_html("SCP-049", "<p>The Plague Doctor.</p>"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/scp-404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &["/scp-series"]);
    let service = SearchService::new(config).expect("Failed to create service");

    let summary = service.refresh(10, false).await.expect("Refresh failed");
    assert_eq!(summary.seed_links, 3);
    assert_eq!(summary.crawl.fetched, 2);
    assert_eq!(summary.crawl.failed, 1);
    assert_eq!(summary.pages_cached, 2);

    let page = service
        .cache()
        .get(&format!("{}/scp-173", base_url))
        .expect("SCP-173 should be cached");
    assert_eq!(page.title, "SCP-173");
    assert!(page.text.contains("Item #: SCP-173"));
    assert!(page.text.contains("Object Class: Euclid"));
    assert!(!page.text.contains("rating"));
    assert!(!page.text.contains("keter"));

    assert!(service
        .cache()
        .get(&format!("{}/scp-404", base_url))
        .is_none());
}

#[tokio::test]
async fn test_recrawl_does_not_refetch_cached_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/scp-series",
        r#"<a href="/scp-100">100</a><a href="/scp-101">101</a><a href="/scp-102">102</a>"#
            .to_string(),
    )
    .await;

    for slug in ["scp-100", "scp-101", "scp-102"] {
        Mock::given(method("GET"))
            .and(path(format!("/{}", slug)))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(article_html(slug, "<p>text</p>")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(&base_url, &["/scp-series"]);
    let service = SearchService::new(config).expect("Failed to create service");

    service.refresh(2, false).await.expect("First refresh failed");
    assert_eq!(service.cache().len(), 2);

    let summary = service.refresh(3, false).await.expect("Second refresh failed");
    assert_eq!(summary.crawl.already_cached, 2);
    assert_eq!(summary.crawl.fetched, 1);

    let summary = service.refresh(3, false).await.expect("Third refresh failed");
    assert_eq!(summary.crawl.fetched, 0);
    assert_eq!(summary.crawl.already_cached, 3);

    // Each article mock expects exactly one request; verified on drop
    mock_server.verify().await;
}
