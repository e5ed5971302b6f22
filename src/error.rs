// src/error.rs
use thiserror::Error;

/// Failures the digest distinguishes at its boundary.
///
/// Feed errors are recoverable and never leave the collector; configuration and
/// delivery errors end the run.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("feed {source_name} unavailable: {reason}")]
    Feed { source_name: String, reason: String },

    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl DigestError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn delivery(err: impl std::fmt::Display) -> Self {
        Self::Delivery(err.to_string())
    }
}

pub type DigestResult<T> = std::result::Result<T, DigestError>;
