//! Notification domain
//!
//! Newly registered volunteers receive their generated password by email.

mod message;

pub use message::{EmailMessage, PasswordNoticeTemplate, PASSWORD_PLACEHOLDER};

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Sends the password notice to a newly registered volunteer
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `password` to `recipient`
    async fn send_password(&self, recipient: &str, password: &str) -> Result<(), DomainError>;

    /// Notifier name for logging
    fn notifier_name(&self) -> &'static str;
}
