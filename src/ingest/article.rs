// src/ingest/article.rs
//! Extended summaries: download the article page behind each selected story and
//! splice its body text into the summary. Every failure degrades to a fixed
//! placeholder; nothing here can fail the run.

use anyhow::{bail, Context, Result};
use metrics::counter;
use once_cell::sync::OnceCell;
use regex::Regex;
use reqwest::Client;

use crate::analyze::Story;
use crate::ingest::normalize_title;

pub const ARTICLE_FALLBACK: &str = "Full text not available.";

/// Summaries shorter than this get article text appended.
const SHORT_SUMMARY_CHARS: usize = 500;
const BODY_EXCERPT_CHARS: usize = 1_000;
const EXTENDED_MAX_CHARS: usize = 1_500;

pub struct ArticleEnricher {
    client: Client,
}

impl ArticleEnricher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Replace each story's summary with its extended form, one story at a time.
    pub async fn enrich(&self, stories: Vec<Story>) -> Vec<Story> {
        let mut out = Vec::with_capacity(stories.len());
        for story in stories {
            let extended = self.extended_summary(&story).await;
            out.push(story.replace_summary(extended));
        }
        out
    }

    async fn extended_summary(&self, story: &Story) -> String {
        if story.link.is_empty() {
            counter!("digest_article_fallbacks_total").increment(1);
            return ARTICLE_FALLBACK.to_string();
        }
        match self.fetch_body_text(&story.link).await {
            Ok(body) => build_extended_summary(&normalize_title(&story.summary), &body),
            Err(e) => {
                tracing::debug!(
                    target: "ingest",
                    error = ?e,
                    url = %story.link,
                    "article fetch failed"
                );
                counter!("digest_article_fallbacks_total").increment(1);
                ARTICLE_FALLBACK.to_string()
            }
        }
    }

    async fn fetch_body_text(&self, url: &str) -> Result<String> {
        let html = self
            .client
            .get(url)
            .send()
            .await
            .context("article request")?
            .error_for_status()
            .context("article non-2xx")?
            .text()
            .await
            .context("article body")?;

        let text = extract_paragraphs(&html);
        if text.is_empty() {
            bail!("no paragraph text in {url}");
        }
        Ok(text)
    }
}

/// Join the text of every `<p>` element, skipping script/style blocks.
pub fn extract_paragraphs(html: &str) -> String {
    static RE_NOISE: OnceCell<Regex> = OnceCell::new();
    static RE_PARA: OnceCell<Regex> = OnceCell::new();
    let re_noise = RE_NOISE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style|noscript)\b.*?</(script|style|noscript)>").unwrap()
    });
    let re_para = RE_PARA.get_or_init(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").unwrap());

    let cleaned = re_noise.replace_all(html, " ");
    re_para
        .captures_iter(&cleaned)
        .filter_map(|c| c.get(1))
        .map(|m| normalize_title(m.as_str()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Summary first; short summaries are padded with the article's opening text.
pub fn build_extended_summary(summary: &str, body: &str) -> String {
    let mut out = summary.trim().to_string();
    if out.chars().count() < SHORT_SUMMARY_CHARS {
        let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        if out.is_empty() {
            out = excerpt;
        } else {
            out.push_str("\n\n");
            out.push_str(&excerpt);
        }
    }
    out.chars().take(EXTENDED_MAX_CHARS).collect()
}
