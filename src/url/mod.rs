//! URL handling module
//!
//! This module provides article URL canonicalization and the article URL
//! pattern matcher used by link discovery and the crawler.

mod matcher;
mod normalize;

pub use matcher::ArticleMatcher;
pub use normalize::{canonicalize, canonicalize_url};
