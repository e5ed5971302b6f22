// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod config;
pub mod error;
pub mod ingest;
pub mod notify;
pub mod pipeline;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{select_top, KeywordScorer, Story};
pub use crate::config::{Credentials, DigestConfig};
pub use crate::error::{DigestError, DigestResult};
pub use crate::ingest::types::{RawStory, SourceProvider};
pub use crate::notify::{Deliver, EmailSender, StdoutSender};
pub use crate::pipeline::{build_digest, send_digest, Digest};
pub use crate::report::{clean_summary, render, ReportOptions};
