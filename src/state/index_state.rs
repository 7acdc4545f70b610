/// Lifecycle state definitions for the search index
///
/// The index starts uninitialized, passes through discovery while seed links
/// are gathered and the first pages crawled, and ends up ready for queries.
use serde::Serialize;
use std::fmt;

/// Represents the lifecycle state of the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    /// No discovery or crawl has completed yet
    Uninitialized,

    /// Seed links are being discovered and pages crawled
    Discovering,

    /// At least one discovery/crawl pass has completed
    Ready,
}

impl IndexState {
    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// | From | To |
    /// |------|----|
    /// | Uninitialized | Discovering |
    /// | Discovering | Ready, Uninitialized (interrupted) |
    /// | Ready | Discovering (refresh) |
    pub fn can_transition_to(&self, next: IndexState) -> bool {
        matches!(
            (self, next),
            (Self::Uninitialized, Self::Discovering)
                | (Self::Discovering, Self::Ready)
                | (Self::Discovering, Self::Uninitialized)
                | (Self::Ready, Self::Discovering)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Discovering => "discovering",
            Self::Ready => "ready",
        }
    }
}

impl Default for IndexState {
    fn default() -> Self {
        Self::Uninitialized
    }
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
