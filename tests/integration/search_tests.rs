use crate::{article_html, create_test_config, mount_html};
use scp_freq_search::{IndexState, SearchService};
use wiremock::MockServer;

async fn mount_red_door_wiki(mock_server: &MockServer) {
    mount_html(
        mock_server,
        "/scp-series",
        r#"<a href="/scp-001">A</a><a href="/scp-002">B</a>"#.to_string(),
    )
    .await;
    mount_html(
        mock_server,
        "/scp-001",
        article_html(
            "SCP-001",
            "<p>The anomaly was contained. A second anomaly followed the first anomaly.</p>\
             <p>Every anomaly passes the red door, and no anomaly returns.</p>",
        ),
    )
    .await;
    mount_html(
        mock_server,
        "/scp-002",
        article_html("SCP-002", "<p>A living room with furniture.</p>"),
    )
    .await;
}

#[tokio::test]
async fn test_phrase_search_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_red_door_wiki(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), &["/scp-series"]);
    let service = SearchService::new(config).expect("Failed to create service");
    service.refresh(10, false).await.expect("Refresh failed");
    assert_eq!(service.cache().len(), 2);

    let results = service
        .search("red door", Some(10))
        .await
        .expect("Search failed");

    assert_eq!(results.len(), 1);
    let hit = &results[0];
    assert_eq!(hit.url, format!("{}/scp-001", mock_server.uri()));
    assert_eq!(hit.title, "SCP-001");
    assert_eq!(hit.phrase_hits, 1);
    assert!(hit.score >= 3);
    assert_eq!(hit.score, 3 + hit.term_hits.values().sum::<usize>());
    assert!(hit.snippet.as_deref().unwrap().contains("red door"));

    let anomaly = service.search("anomaly", Some(10)).await.unwrap();
    assert_eq!(anomaly.len(), 1);
    assert_eq!(anomaly[0].term_hits["anomaly"], 5);
    assert_eq!(anomaly[0].phrase_hits, 5);
    assert_eq!(anomaly[0].score, 20);
}

#[tokio::test]
async fn test_first_search_bootstraps_cache() {
    let mock_server = MockServer::start().await;
    mount_red_door_wiki(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), &["/scp-series"]);
    let service = SearchService::new(config).expect("Failed to create service");
    assert_eq!(service.state(), IndexState::Uninitialized);

    let results = service.search("living room", None).await.unwrap();

    assert_eq!(service.state(), IndexState::Ready);
    assert_eq!(service.cache().len(), 2);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "SCP-002");

    let status = service.status();
    assert_eq!(status.pages_cached, 2);
    assert_eq!(status.links_cached, 2);
    assert!(status.last_refresh.is_some());
}

#[tokio::test]
async fn test_unreachable_wiki_yields_empty_results() {
    let mock_server = MockServer::start().await;
    // Nothing mounted: every request answers 404

    let config = create_test_config(&mock_server.uri(), &["/scp-series"]);
    let service = SearchService::new(config).expect("Failed to create service");

    let results = service.search("red door", None).await.unwrap();
    assert!(results.is_empty());
    assert_eq!(service.state(), IndexState::Ready);
    assert_eq!(service.status().pages_cached, 0);
}
