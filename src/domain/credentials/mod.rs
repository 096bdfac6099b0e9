//! Credential domain: the pairs accepted by Basic authentication

mod credential;
mod store;

pub use credential::Credential;
pub use store::CredentialStore;

#[cfg(test)]
pub use store::MockCredentialStore;
