//! State module for the process-lifetime shared state
//!
//! # Components
//!
//! - `PageCache`: append-only mapping from canonical article URL to extracted page
//! - `IndexState`: lifecycle of the index (uninitialized, discovering, ready)

mod index_state;
mod page_cache;

// Re-export main types
pub use index_state::IndexState;
pub use page_cache::{Page, PageCache};
