// src/ingest/types.rs
use anyhow::Result;

/// Title used when a feed entry carries no usable headline.
pub const UNTITLED: &str = "(untitled)";

/// A feed entry normalized into the digest's uniform shape, before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStory {
    pub title: String,     // normalized headline, never empty
    pub summary: String,   // raw feed description, may contain markup
    pub published: String, // display string as found in the feed, may be empty
    pub source: String,    // e.g. "BBC World", "Reuters"
    pub link: String,      // article URL, may be empty
}

impl RawStory {
    pub fn new(source: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            title: if title.trim().is_empty() {
                UNTITLED.to_string()
            } else {
                title
            },
            summary: String::new(),
            published: String::new(),
            source: source.into(),
            link: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }
}

/// One syndication source. Implementations must return entries in feed order
/// (newest first for well-behaved feeds); dedup keeps the first occurrence.
#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawStory>>;
    fn name(&self) -> &str;
}
