// src/ingest/providers/rss.rs
//! RSS 2.0 / Atom provider. One instance per configured feed endpoint.
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::ingest::normalize_title;
use crate::ingest::types::{RawStory, SourceProvider};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    title: Option<AtomText>,
    #[serde(rename = "entry", default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
    #[serde(default)]
    link: Vec<AtomLink>,
    published: Option<String>,
    updated: Option<String>,
    summary: Option<AtomText>,
    content: Option<AtomText>,
}

#[derive(Debug, Deserialize)]
struct AtomText {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

impl AtomEntry {
    /// `rel="alternate"` (or no rel) is the article page.
    fn article_link(&self) -> Option<String> {
        self.link
            .iter()
            .find(|l| l.rel.as_deref().map_or(true, |r| r == "alternate"))
            .or_else(|| self.link.first())
            .and_then(|l| l.href.clone())
    }
}

pub struct RssFeedProvider {
    label: String,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl RssFeedProvider {
    /// Parse an in-memory document instead of downloading one.
    pub fn from_fixture(label: impl Into<String>, xml: &str) -> Self {
        Self {
            label: label.into(),
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    /// Download from `url` on every fetch. Request timeouts are the client's.
    pub fn from_url(url: impl Into<String>, client: reqwest::Client) -> Self {
        let url = url.into();
        Self {
            label: url.clone(),
            mode: Mode::Http { url, client },
        }
    }

    fn parse_items_from_str(&self, s: &str) -> Result<Vec<RawStory>> {
        let t0 = std::time::Instant::now();
        let xml_clean = scrub_html_entities_for_xml(s);

        let out = match from_str::<Rss>(&xml_clean) {
            Ok(rss) => self.stories_from_rss(rss),
            Err(rss_err) => match from_str::<AtomFeed>(&xml_clean) {
                Ok(feed) if !feed.entry.is_empty() || xml_clean.contains("<feed") => {
                    self.stories_from_atom(feed)
                }
                Ok(_) => {
                    return Err(anyhow!(rss_err))
                        .with_context(|| format!("parsing feed xml from {}", self.label))
                }
                Err(atom_err) => {
                    return Err(anyhow!("not RSS ({rss_err}) nor Atom ({atom_err})"))
                        .with_context(|| format!("parsing feed xml from {}", self.label))
                }
            },
        };

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("digest_parse_ms").record(ms);
        Ok(out)
    }

    fn source_name(&self, feed_title: Option<&str>) -> String {
        feed_title
            .map(normalize_title)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.label.clone())
    }

    fn stories_from_rss(&self, rss: Rss) -> Vec<RawStory> {
        let source = self.source_name(rss.channel.title.as_deref());
        rss.channel
            .item
            .into_iter()
            .map(|it| {
                RawStory::new(
                    source.clone(),
                    normalize_title(it.title.as_deref().unwrap_or_default()),
                )
                .with_summary(decode_summary(it.description.as_deref().unwrap_or_default()))
                .with_published(it.pub_date.unwrap_or_default().trim())
                .with_link(it.link.unwrap_or_default().trim())
            })
            .collect()
    }

    fn stories_from_atom(&self, feed: AtomFeed) -> Vec<RawStory> {
        let source = self.source_name(feed.title.as_ref().map(|t| t.value.as_str()));
        feed.entry
            .into_iter()
            .map(|e| {
                let link = e.article_link().unwrap_or_default();
                let summary = e.summary.or(e.content).map(|t| t.value).unwrap_or_default();
                let summary = decode_summary(&summary);
                let published = e.published.or(e.updated).unwrap_or_default();
                RawStory::new(
                    source.clone(),
                    normalize_title(e.title.as_ref().map(|t| t.value.as_str()).unwrap_or_default()),
                )
                .with_summary(summary)
                .with_published(published.trim())
                .with_link(link.trim())
            })
            .collect()
    }
}

#[async_trait]
impl SourceProvider for RssFeedProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawStory>> {
        match &self.mode {
            Mode::Fixture(s) => self.parse_items_from_str(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url.as_str())
                    .send()
                    .await
                    .with_context(|| format!("GET {url}"))?
                    .error_for_status()
                    .with_context(|| format!("GET {url}"))?
                    .text()
                    .await
                    .context("feed http .text()")?;
                self.parse_items_from_str(&body)
            }
        }
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Escaped markup and CDATA bodies both arrive with HTML entities still encoded.
/// Decoded once here; tags are left for the report to strip.
fn decode_summary(s: &str) -> String {
    html_escape::decode_html_entities(s).trim().to_string()
}

/// HTML entities that feeds leak into XML and the XML parser rejects.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
}
