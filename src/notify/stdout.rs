use super::Deliver;
use crate::error::DigestResult;

/// Dry-run sink: prints the message instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSender;

#[async_trait::async_trait]
impl Deliver for StdoutSender {
    async fn deliver(&self, recipient: &str, subject: &str, body: &str) -> DigestResult<()> {
        println!("To: {recipient}\nSubject: {subject}\n\n{body}");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}
