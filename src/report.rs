// src/report.rs
//! Plain-text digest layout.
//!
//! ```text
//! 🌍 Daily Global News Briefing
//! Top stories for Wednesday, 15 October 2025
//!
//! 1. <title>
//!    Source: <source>
//!    Published: <published>        (omitted when empty)
//!    Read more: <link>             (omitted when empty)
//!    <cleaned summary>             (omitted when empty)
//!
//! 2. ...
//!
//! — End of briefing —
//! ```

use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::analyze::Story;

pub const BANNER: &str = "🌍 Daily Global News Briefing";
pub const FOOTER: &str = "— End of briefing —";
pub const NO_STORIES: &str = "No stories could be retrieved for today's briefing.";
pub const ELLIPSIS: char = '…';
pub const DEFAULT_SUMMARY_MAX_LENGTH: usize = 250;
pub const DEFAULT_SUBJECT_PREFIX: &str = "Daily Global News";

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub summary_max_length: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            summary_max_length: DEFAULT_SUMMARY_MAX_LENGTH,
        }
    }
}

/// Strip tags, collapse whitespace, trim, then cut to `max_len` chars with a
/// trailing `…` when anything was cut. Applying it twice changes nothing.
pub fn clean_summary(text: &str, max_len: usize) -> String {
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?s)<[^>]+>").unwrap());
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());

    let stripped = re_tags.replace_all(text, " ");
    let collapsed = re_ws.replace_all(&stripped, " ");
    let out = collapsed.trim();

    if out.chars().count() <= max_len {
        return out.to_string();
    }
    let mut cut: String = out.chars().take(max_len).collect();
    cut.push(ELLIPSIS);
    cut
}

pub fn title_line(date: NaiveDate) -> String {
    format!("Top stories for {}", date.format("%A, %-d %B %Y"))
}

pub fn subject_line(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix} - {}", date.format("%Y-%m-%d"))
}

fn render_block(out: &mut String, index: usize, story: &Story, opts: &ReportOptions) {
    out.push_str(&format!("{index}. {}\n", story.title));
    out.push_str(&format!("   Source: {}\n", story.source));
    if !story.published.is_empty() {
        out.push_str(&format!("   Published: {}\n", story.published));
    }
    if !story.link.is_empty() {
        out.push_str(&format!("   Read more: {}\n", story.link));
    }
    let summary = clean_summary(&story.summary, opts.summary_max_length);
    if !summary.is_empty() {
        out.push_str(&format!("   {summary}\n"));
    }
}

/// Render the ranked stories. An empty slice yields the no-stories notice.
pub fn render(stories: &[Story], date: NaiveDate, opts: &ReportOptions) -> String {
    let mut out = String::new();
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(&title_line(date));
    out.push_str("\n\n");

    if stories.is_empty() {
        out.push_str(NO_STORIES);
        out.push_str("\n\n");
    } else {
        for (i, story) in stories.iter().enumerate() {
            render_block(&mut out, i + 1, story, opts);
            out.push('\n');
        }
    }

    out.push_str(FOOTER);
    out.push('\n');
    out
}
