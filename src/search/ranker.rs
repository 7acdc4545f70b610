use crate::search::scorer::{count_hits, make_snippet, Query};
use crate::search::SearchResult;
use crate::state::PageCache;

/// Ranks every cached page against a query
///
/// Pages scoring zero are dropped. Results are sorted by score, highest
/// first; equal scores keep the cache's URL order. At most `limit` results
/// are returned, and snippets are only built for those.
pub fn rank(cache: &PageCache, query: &str, limit: usize, snippet_len: usize) -> Vec<SearchResult> {
    let query = Query::parse(query);
    let pages = cache.snapshot();

    let mut scored: Vec<_> = pages
        .iter()
        .filter_map(|page| {
            let hits = count_hits(&page.text, &query);
            let score = hits.score();
            (score > 0).then_some((page, score, hits))
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(page, score, hits)| SearchResult {
            url: page.url.clone(),
            title: page.title.clone(),
            score,
            phrase_hits: hits.phrase_hits,
            term_hits: hits.term_hits,
            snippet: make_snippet(&page.text, &query, snippet_len),
        })
        .collect()
}
