// src/ingest/mod.rs
pub mod article;
pub mod providers;
pub mod types;

use crate::error::DigestError;
use crate::ingest::types::{RawStory, SourceProvider};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

/// Default cap on how many entries a single feed may contribute.
pub const DEFAULT_PER_SOURCE_LIMIT: usize = 15;

/// One-time metrics registration.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "digest_stories_fetched_total",
            "Stories kept from feeds after the per-source cap."
        );
        describe_counter!(
            "digest_feed_errors_total",
            "Feeds that failed to download or parse."
        );
        describe_counter!(
            "digest_duplicates_dropped_total",
            "Stories removed by fingerprint dedup."
        );
        describe_counter!(
            "digest_article_fallbacks_total",
            "Article enrichments that fell back to the placeholder."
        );
        describe_histogram!("digest_parse_ms", "Feed parse time in milliseconds.");
    });
}

/// Normalize a headline: decode entities, strip tags, collapse whitespace, trim.
pub fn normalize_title(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    let out = re_tags.replace_all(&decoded, "");

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// Fetch every provider in order and flatten the results.
///
/// Each provider contributes at most `per_source_limit` entries, taken from the
/// front of its feed. A provider that errors is logged and skipped; the run
/// continues with whatever the other providers returned.
pub async fn collect_stories(
    providers: &[Box<dyn SourceProvider>],
    per_source_limit: usize,
) -> Vec<RawStory> {
    ensure_metrics_described();

    let mut out = Vec::new();
    for p in providers {
        match p.fetch_latest().await {
            Ok(mut v) => {
                v.truncate(per_source_limit);
                tracing::debug!(target: "ingest", provider = p.name(), kept = v.len(), "feed ok");
                counter!("digest_stories_fetched_total").increment(v.len() as u64);
                out.append(&mut v);
            }
            Err(e) => {
                let err = DigestError::Feed {
                    source_name: p.name().to_string(),
                    reason: format!("{e:#}"),
                };
                tracing::warn!(target: "ingest", error = %err, "skipping feed");
                counter!("digest_feed_errors_total").increment(1);
            }
        }
    }

    tracing::info!(
        target: "ingest",
        providers = providers.len(),
        stories = out.len(),
        "collected stories"
    );
    out
}
