//! Frequency scoring of a page against a query
//!
//! All matching is case-insensitive substring matching: a term can match
//! inside a longer word, and occurrences are counted without overlap.

use crate::search::tokenizer::query_terms;
use crate::state::Page;
use std::collections::BTreeMap;

/// Weight of one full-phrase occurrence relative to one term occurrence
pub const PHRASE_WEIGHT: usize = 3;

/// Marker appended to a snippet that stops before the end of the text
pub const ELLIPSIS: char = '…';

/// A query prepared once and scored against many pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The whole query, trimmed and lowercased
    phrase: String,
    /// Scoring terms in tokenized order
    terms: Vec<String>,
}

impl Query {
    pub fn parse(query: &str) -> Self {
        Self {
            phrase: query.trim().to_lowercase(),
            terms: query_terms(query),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Hit counts of a page for a query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hits {
    pub phrase_hits: usize,
    pub term_hits: BTreeMap<String, usize>,
}

impl Hits {
    /// `PHRASE_WEIGHT * phrase_hits + sum of term hits`
    pub fn score(&self) -> usize {
        PHRASE_WEIGHT * self.phrase_hits + self.term_hits.values().sum::<usize>()
    }
}

/// Full scoring outcome of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub score: usize,
    pub phrase_hits: usize,
    pub term_hits: BTreeMap<String, usize>,
    pub snippet: Option<String>,
}

/// Scores a page against a query, snippet included
///
/// # Example
///
/// ```
/// use scp_freq_search::search::{score, Query};
/// use scp_freq_search::Page;
///
/// let page = Page::new("https://wiki.test/scp-001", "", "The red door. Another red door.");
/// let result = score(&page, &Query::parse("red door"), 240);
/// assert_eq!(result.phrase_hits, 2);
/// assert_eq!(result.score, 3 * 2 + 2 + 2);
/// ```
pub fn score(page: &Page, query: &Query, snippet_len: usize) -> Score {
    let hits = count_hits(&page.text, query);
    Score {
        score: hits.score(),
        snippet: make_snippet(&page.text, query, snippet_len),
        phrase_hits: hits.phrase_hits,
        term_hits: hits.term_hits,
    }
}

/// Counts phrase and term occurrences in `text`
pub fn count_hits(text: &str, query: &Query) -> Hits {
    let lowered = text.to_lowercase();
    Hits {
        phrase_hits: count_occurrences(&lowered, &query.phrase),
        term_hits: query
            .terms
            .iter()
            .map(|term| (term.clone(), count_occurrences(&lowered, term)))
            .collect(),
    }
}

/// Counts non-overlapping occurrences of `needle` in `haystack`
///
/// An empty needle never matches.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Builds a snippet around the first match of the query
///
/// The full phrase is looked for first, then each term in order. The window
/// holds at most `budget` characters: a third of them before the match, the
/// rest from the match on.
pub fn make_snippet(text: &str, query: &Query, budget: usize) -> Option<String> {
    let folded = FoldedText::new(text);

    let match_char = std::iter::once(query.phrase.as_str())
        .chain(query.terms.iter().map(String::as_str))
        .filter(|needle| !needle.is_empty())
        .find_map(|needle| folded.find(needle))?;

    let chars: Vec<char> = text.chars().collect();
    let before = budget / 3;
    let start = match_char.saturating_sub(before);
    let end = (match_char + (budget - before)).min(chars.len());

    let mut snippet: String = chars[start..end]
        .iter()
        .map(|&c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if end < chars.len() {
        snippet.push(ELLIPSIS);
    }
    Some(snippet)
}

/// Lowercased text that remembers which original character each byte came from
struct FoldedText {
    folded: String,
    /// Original character index of every byte of `folded`
    origin: Vec<usize>,
}

impl FoldedText {
    /// Folds with `str::to_lowercase`, the same folding `count_hits` uses
    fn new(text: &str) -> Self {
        let folded = text.to_lowercase();
        let mut origin = Vec::with_capacity(folded.len());
        let mut lowered = folded.chars();

        // Context-sensitive folds (final sigma) change which char comes out,
        // never how many
        for (index, c) in text.chars().enumerate() {
            for lower in lowered.by_ref().take(c.to_lowercase().count()) {
                origin.extend(std::iter::repeat(index).take(lower.len_utf8()));
            }
        }

        Self { folded, origin }
    }

    /// Original character index of the first occurrence of `needle`
    fn find(&self, needle: &str) -> Option<usize> {
        self.folded.find(needle).map(|byte| self.origin[byte])
    }
}
