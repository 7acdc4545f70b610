//! Frequency search over the page cache
//!
//! - `tokenizer`: query term extraction
//! - `scorer`: phrase/term counts, composite score and snippet for one page
//! - `ranker`: scores all cached pages and orders the results

mod ranker;
mod scorer;
mod tokenizer;

use serde::Serialize;
use std::collections::BTreeMap;

pub use ranker::rank;
pub use scorer::{
    count_hits, count_occurrences, make_snippet, score, Hits, Query, Score, ELLIPSIS,
    PHRASE_WEIGHT,
};
pub use tokenizer::{query_terms, tokenize, MIN_TERM_CHARS};

/// One ranked page, recomputed for every query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub score: usize,
    pub phrase_hits: usize,
    pub term_hits: BTreeMap<String, usize>,
    pub snippet: Option<String>,
}
