//! SMTP notifier backed by lettre

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::EmailConfig;
use crate::domain::notification::{EmailMessage, Notifier, PasswordNoticeTemplate};
use crate::domain::DomainError;

/// Sends password notices through a plain SMTP relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    template: PasswordNoticeTemplate,
    relay: String,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("relay", &self.relay)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    /// Build a notifier for the configured relay and template
    pub fn new(config: &EmailConfig) -> Result<Self, DomainError> {
        let (host, port) = parse_relay(&config.relay)?;

        config
            .sender
            .parse::<Mailbox>()
            .map_err(|e| DomainError::configuration(format!("Invalid email sender: {}", e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self {
            transport,
            template: PasswordNoticeTemplate::new(&config.sender, &config.subject, &config.body),
            relay: config.relay.clone(),
        })
    }

    fn build_message(message: &EmailMessage) -> Result<Message, DomainError> {
        let from = message
            .from
            .parse::<Mailbox>()
            .map_err(|e| DomainError::configuration(format!("Invalid email sender: {}", e)))?;

        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| DomainError::notification(format!("Invalid recipient: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body_text.clone())
            .map_err(|e| DomainError::notification(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_password(&self, recipient: &str, password: &str) -> Result<(), DomainError> {
        let message = self.template.compose(recipient, password);
        let email = Self::build_message(&message)?;

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| DomainError::notification(format!("SMTP send failed: {}", e)))?;

        debug!(
            relay = %self.relay,
            code = %response.code(),
            "SMTP relay accepted message"
        );

        Ok(())
    }

    fn notifier_name(&self) -> &'static str {
        "smtp"
    }
}

/// Split a `host:port` relay address
fn parse_relay(relay: &str) -> Result<(&str, u16), DomainError> {
    let (host, port) = relay.rsplit_once(':').ok_or_else(|| {
        DomainError::configuration(format!("Email relay '{}' must be host:port", relay))
    })?;

    if host.is_empty() {
        return Err(DomainError::configuration(format!(
            "Email relay '{}' has no host",
            relay
        )));
    }

    let port = port.parse::<u16>().map_err(|_| {
        DomainError::configuration(format!("Email relay '{}' has an invalid port", relay))
    })?;

    Ok((host, port))
}
