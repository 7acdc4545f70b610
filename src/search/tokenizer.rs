use regex::Regex;
use std::sync::OnceLock;

/// Terms this short (in characters) carry no signal and are dropped
pub const MIN_TERM_CHARS: usize = 3;

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[A-Za-z0-9']+").expect("word pattern is valid"))
}

/// Splits text into lowercase words of ASCII letters, digits and apostrophes
pub fn tokenize(text: &str) -> Vec<String> {
    word_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Tokenizes a query into its scoring terms
///
/// Short terms are dropped and repeated terms kept once, in first-seen order.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in tokenize(query) {
        if word.chars().count() >= MIN_TERM_CHARS && !terms.contains(&word) {
            terms.push(word);
        }
    }
    terms
}
