//! Credential cache used by Basic authentication

mod cache;

pub use cache::{constant_time_eq, CredentialCache};
