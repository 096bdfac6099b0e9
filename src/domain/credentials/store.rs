use async_trait::async_trait;

use super::Credential;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Source of truth for the (identity, secret) pairs that may authenticate
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Load every stored credential
    async fn load_credentials(&self) -> Result<Vec<Credential>, DomainError>;
}
