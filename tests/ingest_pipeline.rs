// tests/ingest_pipeline.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use news_digest::config::DigestConfig;
use news_digest::ingest::providers::RssFeedProvider;
use news_digest::ingest::types::{RawStory, SourceProvider};
use news_digest::notify::Deliver;
use news_digest::pipeline::{build_digest, send_digest};
use news_digest::report::NO_STORIES;
use news_digest::{DigestError, DigestResult};
use std::sync::Mutex;

const WORLD_XML: &str = include_str!("fixtures/world_rss.xml");
const DESK_XML: &str = include_str!("fixtures/desk_atom.xml");

struct DownProvider;

#[async_trait]
impl SourceProvider for DownProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawStory>> {
        Err(anyhow!("503 Service Unavailable"))
    }
    fn name(&self) -> &str {
        "down"
    }
}

#[derive(Default)]
struct RecordingSender {
    calls: Mutex<Vec<(String, String, String)>>,
    fail: bool,
}

#[async_trait]
impl Deliver for RecordingSender {
    async fn deliver(&self, recipient: &str, subject: &str, body: &str) -> DigestResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((recipient.into(), subject.into(), body.into()));
        if self.fail {
            return Err(DigestError::delivery("535 authentication failed"));
        }
        Ok(())
    }
    fn name(&self) -> &'static str {
        "recording"
    }
}

fn cfg() -> DigestConfig {
    DigestConfig {
        keyword_set: vec!["war".into(), "china".into(), "market".into(), "election".into()],
        top_n: 3,
        ..DigestConfig::default()
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
}

#[tokio::test]
async fn fixtures_rank_dedup_and_render() {
    let providers: Vec<Box<dyn SourceProvider>> = vec![
        Box::new(RssFeedProvider::from_fixture("world", WORLD_XML)),
        Box::new(DownProvider),
        Box::new(RssFeedProvider::from_fixture("desk", DESK_XML)),
    ];
    let digest = build_digest(&cfg(), &providers, None, date()).await;

    let picked: Vec<(&str, &str, f64)> = digest
        .stories
        .iter()
        .map(|s| (s.title.as_str(), s.source.as_str(), s.score))
        .collect();
    assert_eq!(
        picked,
        vec![
            ("China and US trade war escalates", "World Wire", 4.0),
            ("3 killed in market crash", "World Wire", 3.5),
            ("Election results due tonight", "Evening Desk", 2.0),
        ]
    );

    assert_eq!(digest.subject, "Daily Global News - 2025-10-15");
    assert!(digest.body.contains("1. China and US trade war escalates\n"));
    assert!(digest.body.contains("   Tariffs rise again as talks stall.\n"));
    assert!(digest.body.contains("3. Election results due tonight\n"));
    assert!(!digest.body.contains("bakery"));
}

#[tokio::test]
async fn all_feeds_down_still_renders_report() {
    let providers: Vec<Box<dyn SourceProvider>> = vec![Box::new(DownProvider)];
    let digest = build_digest(&cfg(), &providers, None, date()).await;
    assert!(digest.stories.is_empty());
    assert!(digest.body.contains(NO_STORIES));

    let sender = RecordingSender::default();
    send_digest(&digest, &sender, "me@example.test").await.unwrap();
    assert_eq!(sender.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delivery_happens_once_and_failure_surfaces() {
    let providers: Vec<Box<dyn SourceProvider>> =
        vec![Box::new(RssFeedProvider::from_fixture("world", WORLD_XML))];
    let digest = build_digest(&cfg(), &providers, None, date()).await;

    let sender = RecordingSender {
        fail: true,
        ..Default::default()
    };
    let err = send_digest(&digest, &sender, "me@example.test")
        .await
        .unwrap_err();
    assert!(matches!(err, DigestError::Delivery(_)));

    let calls = sender.calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "no retry on failure");
    assert_eq!(calls[0].0, "me@example.test");
    assert!(calls[0].1.contains("2025-10-15"));
    assert_eq!(calls[0].2, digest.body);
}
