//! Keyword importance scoring.
//!
//! score(title, summary) =
//!   2.0 per keyword found in the lower-cased title
//! + 1.0 per keyword found in the lower-cased summary
//! + 0.5 if the title contains any digit
//!
//! Matching is plain substring search: "market" also hits "marketing".
//! The score depends on nothing but the two strings and the keyword set.

use super::Story;
use crate::ingest::types::RawStory;

pub const TITLE_HIT: f64 = 2.0;
pub const SUMMARY_HIT: f64 = 1.0;
pub const DIGIT_BONUS: f64 = 0.5;

/// Keywords used when the configuration does not name any.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "war",
    "election",
    "china",
    "russia",
    "ukraine",
    "economy",
    "market",
    "inflation",
    "climate",
    "crisis",
    "attack",
    "president",
    "killed",
    "earthquake",
    "sanctions",
];

#[derive(Debug, Clone, Default)]
pub struct KeywordScorer {
    keywords: Vec<String>,
}

impl KeywordScorer {
    /// Keywords are trimmed and lower-cased; blanks and repeats are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for k in keywords {
            let k = k.as_ref().trim().to_lowercase();
            if !k.is_empty() && !out.contains(&k) {
                out.push(k);
            }
        }
        Self { keywords: out }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn score(&self, title: &str, summary: &str) -> f64 {
        let title_lc = title.to_lowercase();
        let summary_lc = summary.to_lowercase();

        let mut score = 0.0;
        for k in &self.keywords {
            if title_lc.contains(k.as_str()) {
                score += TITLE_HIT;
            }
            if summary_lc.contains(k.as_str()) {
                score += SUMMARY_HIT;
            }
        }
        if title.chars().any(|c| c.is_ascii_digit()) {
            score += DIGIT_BONUS;
        }
        score
    }

    /// The one place a story gets its score.
    pub fn annotate(&self, raw: RawStory) -> Story {
        let score = self.score(&raw.title, &raw.summary);
        Story {
            title: raw.title,
            summary: raw.summary,
            published: raw.published,
            source: raw.source,
            link: raw.link,
            score,
        }
    }

    pub fn annotate_all(&self, raw: Vec<RawStory>) -> Vec<Story> {
        raw.into_iter().map(|r| self.annotate(r)).collect()
    }
}
