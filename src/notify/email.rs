use std::time::Duration;

use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials as SmtpCredentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use super::Deliver;
use crate::config::{Credentials, SmtpSettings};
use crate::error::{DigestError, DigestResult};

/// SMTP submission with STARTTLS, authenticated as the sender identity.
pub struct EmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailSender {
    /// Builds the transport without connecting; the first network round-trip
    /// happens in `deliver`.
    pub fn new(settings: &SmtpSettings, creds: &Credentials) -> DigestResult<Self> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| DigestError::config(format!("invalid SMTP host {}: {e}", settings.host)))?
            .port(settings.port)
            .timeout(Some(Duration::from_secs(settings.timeout_secs)))
            .credentials(SmtpCredentials::new(creds.user.clone(), creds.pass.clone()))
            .build();

        let from = creds
            .user
            .parse()
            .map_err(|e| {
                DigestError::config(format!("invalid sender address {}: {e}", creds.user))
            })?;

        Ok(Self { mailer, from })
    }

    fn build_message(&self, recipient: &str, subject: &str, body: &str) -> DigestResult<Message> {
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| {
                DigestError::config(format!("invalid recipient address {recipient}: {e}"))
            })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| DigestError::delivery(format!("build email: {e}")))
    }
}

#[async_trait::async_trait]
impl Deliver for EmailSender {
    async fn deliver(&self, recipient: &str, subject: &str, body: &str) -> DigestResult<()> {
        let msg = self.build_message(recipient, subject, body)?;
        self.mailer
            .send(msg)
            .await
            .map_err(|e| DigestError::delivery(format!("send email: {e}")))?;
        tracing::info!(target: "digest", %recipient, "email sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "email"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(user: &str) -> Credentials {
        Credentials {
            user: user.into(),
            pass: "token".into(),
        }
    }

    #[test]
    fn builds_without_network() {
        let s = EmailSender::new(&SmtpSettings::default(), &creds("me@example.test")).unwrap();
        assert_eq!(s.from.email.to_string(), "me@example.test");
    }

    #[test]
    fn bad_sender_is_configuration_error() {
        let err = EmailSender::new(&SmtpSettings::default(), &creds("not an address"))
            .err()
            .unwrap();
        assert!(matches!(err, DigestError::Configuration(_)));
    }

    #[test]
    fn bad_recipient_is_configuration_error() {
        let s = EmailSender::new(&SmtpSettings::default(), &creds("me@example.test")).unwrap();
        let err = s.build_message("nope", "subj", "body").unwrap_err();
        assert!(matches!(err, DigestError::Configuration(_)));
        assert!(s.build_message("you@example.test", "subj", "body").is_ok());
    }
}
