// src/pipeline.rs
//! One digest run, stage by stage: fetch all feeds, score all stories,
//! dedup + rank, (optionally) enrich, render, deliver once.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::analyze::{select_top, KeywordScorer, Story};
use crate::config::DigestConfig;
use crate::error::DigestResult;
use crate::ingest::article::ArticleEnricher;
use crate::ingest::collect_stories;
use crate::ingest::providers::RssFeedProvider;
use crate::ingest::types::{RawStory, SourceProvider};
use crate::notify::Deliver;
use crate::report::{render, subject_line, ReportOptions};

const USER_AGENT: &str = concat!("news-digest/", env!("CARGO_PKG_VERSION"));

/// Rendered output of a run, ready to hand to a [`Deliver`].
#[derive(Debug, Clone)]
pub struct Digest {
    pub date: NaiveDate,
    pub subject: String,
    pub body: String,
    pub stories: Vec<Story>,
}

pub fn http_client(cfg: &DigestConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.http_timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .context("building http client")
}

/// One provider per configured endpoint, in configured order.
pub fn build_providers(
    cfg: &DigestConfig,
    client: &reqwest::Client,
) -> Vec<Box<dyn SourceProvider>> {
    cfg.feed_endpoints
        .iter()
        .map(|url| {
            Box::new(RssFeedProvider::from_url(url.clone(), client.clone()))
                as Box<dyn SourceProvider>
        })
        .collect()
}

/// Pure part of the run: scored, deduplicated, ranked top-N.
pub fn rank_stories(raw: Vec<RawStory>, cfg: &DigestConfig) -> Vec<Story> {
    let scorer = KeywordScorer::new(&cfg.keyword_set);
    let scored = scorer.annotate_all(raw);
    let total = scored.len();
    let top = select_top(scored, cfg.top_n);
    tracing::info!(
        target: "digest",
        total,
        selected = top.len(),
        top_n = cfg.top_n,
        "ranked stories"
    );
    top
}

pub async fn build_digest(
    cfg: &DigestConfig,
    providers: &[Box<dyn SourceProvider>],
    enricher: Option<&ArticleEnricher>,
    date: NaiveDate,
) -> Digest {
    let raw = collect_stories(providers, cfg.per_source_limit).await;
    let mut stories = rank_stories(raw, cfg);

    if let Some(e) = enricher {
        stories = e.enrich(stories).await;
    }

    let opts = ReportOptions {
        summary_max_length: cfg.summary_max_length,
    };
    let body = render(&stories, date, &opts);
    let subject = subject_line(&cfg.subject_prefix, date);

    Digest {
        date,
        subject,
        body,
        stories,
    }
}

/// Hand the digest to the transport exactly once.
pub async fn send_digest(
    digest: &Digest,
    deliverer: &dyn Deliver,
    recipient: &str,
) -> DigestResult<()> {
    tracing::info!(
        target: "digest",
        via = deliverer.name(),
        stories = digest.stories.len(),
        subject = %digest.subject,
        "delivering digest"
    );
    deliverer.deliver(recipient, &digest.subject, &digest.body).await
}
