//! Notifiers that do not talk to a mail relay

use async_trait::async_trait;
use tracing::info;

use crate::domain::notification::{Notifier, PasswordNoticeTemplate};
use crate::domain::DomainError;

/// Logs that a notice would have been sent. The password is never logged.
#[derive(Debug)]
pub struct LogNotifier {
    template: PasswordNoticeTemplate,
}

impl LogNotifier {
    pub fn new(template: PasswordNoticeTemplate) -> Self {
        Self { template }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_password(&self, recipient: &str, password: &str) -> Result<(), DomainError> {
        let message = self.template.compose(recipient, password);

        info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            "Email delivery disabled, password notice not sent"
        );

        Ok(())
    }

    fn notifier_name(&self) -> &'static str {
        "log"
    }
}

/// Records every notice in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CapturingNotifier {
    sent: tokio::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl CapturingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured (recipient, password) pairs in send order
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }

    /// Password most recently sent to `recipient`
    pub async fn password_for(&self, recipient: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|(to, _)| to == recipient)
            .map(|(_, password)| password.clone())
    }
}

#[cfg(test)]
#[async_trait]
impl Notifier for CapturingNotifier {
    async fn send_password(&self, recipient: &str, password: &str) -> Result<(), DomainError> {
        self.sent
            .lock()
            .await
            .push((recipient.to_string(), password.to_string()));

        Ok(())
    }

    fn notifier_name(&self) -> &'static str {
        "capture"
    }
}
