// tests/metrics_feed_errors.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use news_digest::ingest::collect_stories;
use news_digest::ingest::providers::RssFeedProvider;
use news_digest::ingest::types::{RawStory, SourceProvider};

const WORLD_XML: &str = include_str!("fixtures/world_rss.xml");

struct DownProvider;

#[async_trait]
impl SourceProvider for DownProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawStory>> {
        Err(anyhow!("dns failure"))
    }
    fn name(&self) -> &str {
        "down"
    }
}

fn counter_value(
    snapshot: &[(
        metrics_util::CompositeKey,
        Option<metrics::Unit>,
        Option<metrics::SharedString>,
        DebugValue,
    )],
    name: &str,
) -> Option<u64> {
    snapshot.iter().find_map(|(k, _, _, v)| match v {
        DebugValue::Counter(c) if k.key().name() == name => Some(*c),
        _ => None,
    })
}

#[test]
fn feed_errors_and_fetched_stories_are_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let stories = metrics::with_local_recorder(&recorder, || {
        let providers: Vec<Box<dyn SourceProvider>> = vec![
            Box::new(DownProvider),
            Box::new(RssFeedProvider::from_fixture("world", WORLD_XML)),
            Box::new(DownProvider),
        ];
        rt.block_on(collect_stories(&providers, 2))
    });
    assert_eq!(stories.len(), 2);

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_value(&snapshot, "digest_feed_errors_total"), Some(2));
    assert_eq!(counter_value(&snapshot, "digest_stories_fetched_total"), Some(2));
}
