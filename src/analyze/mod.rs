// src/analyze/mod.rs
//! Scoring and ranking of collected stories.

pub mod rank;
pub mod scoring;

pub use crate::analyze::rank::{dedup_first_wins, fingerprint, select_top, DEFAULT_TOP_N};
pub use crate::analyze::scoring::{KeywordScorer, DEFAULT_KEYWORDS};

/// A story with its importance score attached.
///
/// Built by [`KeywordScorer::annotate`]; the score always reflects the title and
/// the feed summary the story was scored with.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub title: String,
    pub summary: String,
    pub published: String,
    pub source: String,
    pub link: String,
    pub score: f64,
}

impl Story {
    /// Swap in a new summary for display. The score is not recomputed.
    pub fn replace_summary(self, summary: String) -> Self {
        Self { summary, ..self }
    }
}
