//! Notifier implementations and selection

mod log;
mod smtp;

use std::sync::Arc;

use tracing::info;

use crate::config::EmailConfig;
use crate::domain::notification::{Notifier, PasswordNoticeTemplate};
use crate::domain::DomainError;

pub use log::LogNotifier;
#[cfg(test)]
pub use log::CapturingNotifier;
pub use smtp::SmtpNotifier;

/// Factory selecting the notifier for the configured email settings
#[derive(Debug)]
pub struct NotifierFactory;

impl NotifierFactory {
    pub fn create(config: &EmailConfig) -> Result<Arc<dyn Notifier>, DomainError> {
        if !config.enabled {
            info!("Email delivery disabled, using log notifier");
            return Ok(Arc::new(LogNotifier::new(PasswordNoticeTemplate::new(
                &config.sender,
                &config.subject,
                &config.body,
            ))));
        }

        info!(relay = %config.relay, "Using SMTP notifier");
        Ok(Arc::new(SmtpNotifier::new(config)?))
    }
}
