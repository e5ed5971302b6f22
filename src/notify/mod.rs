// src/notify/mod.rs
//! Delivery of the rendered digest.

pub mod email;
pub mod stdout;

use crate::error::DigestResult;

pub use email::EmailSender;
pub use stdout::StdoutSender;

/// Sends one rendered report. Called at most once per run; implementations do
/// not retry.
#[async_trait::async_trait]
pub trait Deliver: Send + Sync {
    async fn deliver(&self, recipient: &str, subject: &str, body: &str) -> DigestResult<()>;
    fn name(&self) -> &'static str;
}
