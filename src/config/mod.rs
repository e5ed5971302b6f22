// src/config/mod.rs
//! Digest configuration: feeds, keywords, limits and SMTP settings.
//!
//! Lookup order:
//! 1) explicit path (`--config`)
//! 2) $DIGEST_CONFIG_PATH
//! 3) config/digest.toml
//! 4) config/digest.json
//! 5) built-in defaults
//!
//! Every field is optional in the file; missing ones take the defaults below.

pub mod credentials;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::{DEFAULT_KEYWORDS, DEFAULT_TOP_N};
use crate::error::{DigestError, DigestResult};
use crate::ingest::DEFAULT_PER_SOURCE_LIMIT;
use crate::report::{DEFAULT_SUBJECT_PREFIX, DEFAULT_SUMMARY_MAX_LENGTH};

pub use credentials::Credentials;

pub const ENV_CONFIG_PATH: &str = "DIGEST_CONFIG_PATH";

pub const DEFAULT_FEEDS: &[&str] = &[
    "https://feeds.reuters.com/reuters/worldNews",
    "http://feeds.bbci.co.uk/news/world/rss.xml",
    "https://www.economist.com/international/rss.xml",
];

fn default_feeds() -> Vec<String> {
    DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()
}
fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()
}
fn default_top_n() -> usize {
    DEFAULT_TOP_N
}
fn default_summary_max_length() -> usize {
    DEFAULT_SUMMARY_MAX_LENGTH
}
fn default_per_source_limit() -> usize {
    DEFAULT_PER_SOURCE_LIMIT
}
fn default_subject_prefix() -> String {
    DEFAULT_SUBJECT_PREFIX.to_string()
}
fn default_http_timeout_secs() -> u64 {
    20
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    #[serde(default = "default_feeds")]
    pub feed_endpoints: Vec<String>,
    #[serde(default = "default_keywords")]
    pub keyword_set: Vec<String>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_summary_max_length")]
    pub summary_max_length: usize,
    #[serde(default = "default_per_source_limit")]
    pub per_source_limit: usize,
    /// Defaults to the sender identity when unset.
    pub recipient: Option<String>,
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
    /// Download each selected article and splice its text into the summary.
    pub extended_summaries: bool,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    pub smtp: SmtpSettings,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            feed_endpoints: default_feeds(),
            keyword_set: default_keywords(),
            top_n: default_top_n(),
            summary_max_length: default_summary_max_length(),
            per_source_limit: default_per_source_limit(),
            recipient: None,
            subject_prefix: default_subject_prefix(),
            extended_summaries: false,
            http_timeout_secs: default_http_timeout_secs(),
            smtp: SmtpSettings::default(),
        }
    }
}

impl DigestConfig {
    /// Load from an explicit path. TOML or JSON, chosen by extension, then by content.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading digest config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = parse_config(&content, ext.as_str())
            .with_context(|| format!("parsing digest config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Resolve and load the config. Any unreadable or malformed file is a
    /// configuration error.
    pub fn load(explicit: Option<&Path>) -> DigestResult<Self> {
        Self::locate_and_load(explicit).map_err(|e| DigestError::config(format!("{e:#}")))
    }

    fn locate_and_load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            if !p.exists() {
                return Err(anyhow!("config file {} does not exist", p.display()));
            }
            return Self::load_from(p);
        }
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
        }
        let toml_p = PathBuf::from("config/digest.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from("config/digest.json");
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }

    /// Trim lists and replace zero limits with defaults.
    pub fn sanitized(mut self) -> Self {
        self.feed_endpoints = clean_list(self.feed_endpoints, false);
        self.keyword_set = clean_list(self.keyword_set, true);
        self.top_n = nonzero_or_default("top_n", self.top_n, default_top_n());
        self.summary_max_length = nonzero_or_default(
            "summary_max_length",
            self.summary_max_length,
            default_summary_max_length(),
        );
        self.per_source_limit = nonzero_or_default(
            "per_source_limit",
            self.per_source_limit,
            default_per_source_limit(),
        );
        self.http_timeout_secs = nonzero_or_default(
            "http_timeout_secs",
            self.http_timeout_secs,
            default_http_timeout_secs(),
        );
        self.recipient = self
            .recipient
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }
}

fn nonzero_or_default<T>(field: &str, value: T, default: T) -> T
where
    T: Copy + Default + PartialEq + std::fmt::Display,
{
    if value == T::default() {
        tracing::warn!(
            target: "config",
            field,
            %default,
            "zero is not allowed here; using default"
        );
        default
    } else {
        value
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<DigestConfig> {
    match hint_ext {
        "toml" => return Ok(toml::from_str(s)?),
        "json" => return Ok(serde_json::from_str(s)?),
        _ => {}
    }
    if let Ok(v) = serde_json::from_str(s) {
        return Ok(v);
    }
    toml::from_str(s).map_err(|e| anyhow!("unsupported digest config format: {e}"))
}

/// Trim, drop blanks and repeats, keep first-seen order.
fn clean_list(items: Vec<String>, lowercase: bool) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        let t = if lowercase {
            t.to_lowercase()
        } else {
            t.to_string()
        };
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
