//! Human-readable rendering of results and status

use crate::search::SearchResult;
use crate::service::{RefreshSummary, ServiceStatus};

/// Renders ranked results, one block per page
pub fn render_results(query: &str, results: &[SearchResult]) -> String {
    let mut out = String::new();

    if results.is_empty() {
        out.push_str(&format!("No cached pages match {:?}\n", query));
        return out;
    }

    out.push_str(&format!("=== {} results for {:?} ===\n\n", results.len(), query));
    for (position, result) in results.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} ({})\n",
            position + 1,
            result.title,
            result.url
        ));

        let terms = result
            .term_hits
            .iter()
            .map(|(term, count)| format!("{}={}", term, count))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "     score {} | phrase hits {} | terms [{}]\n",
            result.score, result.phrase_hits, terms
        ));

        if let Some(snippet) = &result.snippet {
            out.push_str(&format!("     {}\n", snippet));
        }
        out.push('\n');
    }

    out
}

/// Renders the health snapshot
pub fn render_status(status: &ServiceStatus) -> String {
    let mut out = String::new();
    out.push_str("=== Index Status ===\n\n");
    out.push_str(&format!("  State: {}\n", status.state));
    out.push_str(&format!("  Pages cached: {}\n", status.pages_cached));
    out.push_str(&format!("  Links cached: {}\n", status.links_cached));
    match status.last_refresh {
        Some(at) => out.push_str(&format!("  Last refresh: {}\n", at.to_rfc3339())),
        None => out.push_str("  Last refresh: never\n"),
    }
    out
}

/// Renders the outcome of a refresh
pub fn render_refresh(summary: &RefreshSummary) -> String {
    let crawl = &summary.crawl;
    let mut out = String::new();
    out.push_str("=== Refresh Complete ===\n\n");
    out.push_str(&format!("  Seed links: {}\n", summary.seed_links));
    out.push_str(&format!(
        "  Crawled: {} fetched, {} failed, {} already cached\n",
        crawl.fetched, crawl.failed, crawl.already_cached
    ));
    out.push_str(&format!("  Pages cached: {}\n", summary.pages_cached));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::CrawlReport;
    use crate::state::IndexState;
    use std::collections::BTreeMap;

    fn result() -> SearchResult {
        SearchResult {
            url: "https://wiki.test/scp-173".to_string(),
            title: "SCP-173".to_string(),
            score: 7,
            phrase_hits: 1,
            term_hits: BTreeMap::from([("door".to_string(), 3), ("red".to_string(), 1)]),
            snippet: Some("the red door…".to_string()),
        }
    }

    #[test]
    fn test_render_results() {
        let text = render_results("red door", &[result()]);
        assert!(text.contains("1 results for \"red door\""));
        assert!(text.contains("  1. SCP-173 (https://wiki.test/scp-173)"));
        assert!(text.contains("score 7 | phrase hits 1 | terms [door=3, red=1]"));
        assert!(text.contains("the red door…"));
    }

    #[test]
    fn test_render_no_results() {
        assert_eq!(
            render_results("nothing", &[]),
            "No cached pages match \"nothing\"\n"
        );
    }

    #[test]
    fn test_render_status() {
        let status = ServiceStatus {
            state: IndexState::Ready,
            pages_cached: 12,
            links_cached: 40,
            last_refresh: None,
        };
        let text = render_status(&status);
        assert!(text.contains("State: ready"));
        assert!(text.contains("Pages cached: 12"));
        assert!(text.contains("Links cached: 40"));
        assert!(text.contains("Last refresh: never"));
    }

    #[test]
    fn test_render_status_full_text() {
        let at = chrono::DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let status = ServiceStatus {
            state: IndexState::Discovering,
            pages_cached: 3,
            links_cached: 7,
            last_refresh: Some(at),
        };
        assert_eq!(
            render_status(&status),
            "=== Index Status ===\n\n  State: discovering\n  Pages cached: 3\n  \
             Links cached: 7\n  Last refresh: 2024-05-01T12:00:00+00:00\n"
        );
    }

    #[test]
    fn test_render_refresh() {
        let summary = RefreshSummary {
            seed_links: 30,
            pages_cached: 9,
            crawl: CrawlReport {
                requested: 10,
                rejected: 0,
                already_cached: 1,
                fetched: 8,
                failed: 1,
            },
        };
        let text = render_refresh(&summary);
        assert!(text.contains("Seed links: 30"));
        assert!(text.contains("8 fetched, 1 failed, 1 already cached"));
    }
}
