//! In-memory mirror of the credential store used by Basic authentication

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::credentials::{Credential, CredentialStore};
use crate::domain::DomainError;

/// Identity → secret map consulted on every authenticated request.
///
/// Filled once from the store at startup and afterwards kept in step only by the
/// volunteer create/update/delete paths.
#[derive(Default)]
pub struct CredentialCache {
    entries: RwLock<HashMap<String, String>>,
}

impl CredentialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache contents with every stored credential plus `extra`
    /// (the reporter pair). Returns the number of cached identities.
    pub async fn load(
        &self,
        store: &dyn CredentialStore,
        extra: Option<Credential>,
    ) -> Result<usize, DomainError> {
        let credentials = store.load_credentials().await?;

        let mut loaded: HashMap<String, String> = credentials
            .into_iter()
            .map(Credential::into_parts)
            .collect();

        if let Some(credential) = extra {
            let (identity, secret) = credential.into_parts();
            loaded.insert(identity, secret);
        }

        let count = loaded.len();
        *self.entries.write().await = loaded;

        info!(identities = count, "Credential cache loaded");
        Ok(count)
    }

    /// Insert or replace the secret for `identity`
    pub async fn upsert(&self, identity: &str, secret: &str) {
        debug!(identity = %identity, "Updating cached credential");
        self.entries
            .write()
            .await
            .insert(identity.to_string(), secret.to_string());
    }

    /// Forget `identity`
    pub async fn remove(&self, identity: &str) -> bool {
        debug!(identity = %identity, "Removing cached credential");
        self.entries.write().await.remove(identity).is_some()
    }

    /// Check `identity` maps exactly to `secret`. Empty secrets never match.
    pub async fn verify(&self, identity: &str, secret: &str) -> bool {
        let entries = self.entries.read().await;

        match entries.get(identity) {
            Some(stored) if !stored.is_empty() => constant_time_eq(stored, secret),
            _ => false,
        }
    }

    /// Check whether `identity` has a cached entry
    pub async fn contains(&self, identity: &str) -> bool {
        self.entries.read().await.contains_key(identity)
    }

    /// Number of cached identities
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl std::fmt::Debug for CredentialCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCache").finish_non_exhaustive()
    }
}

/// Constant-time string comparison to prevent timing attacks
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credentials::MockCredentialStore;

    fn store_with(pairs: &[(&str, &str)]) -> MockCredentialStore {
        let credentials: Vec<Credential> = pairs
            .iter()
            .map(|(identity, secret)| Credential::new(*identity, *secret))
            .collect();

        let mut store = MockCredentialStore::new();
        store
            .expect_load_credentials()
            .times(1)
            .returning(move || Ok(credentials.clone()));
        store
    }

    #[tokio::test]
    async fn test_load_includes_store_and_reporter() {
        let cache = CredentialCache::new();
        let store = store_with(&[("a@x.com", "pw-a"), ("b@x.com", "pw-b")]);

        let count = cache
            .load(&store, Some(Credential::new("reporter", "rep-pw")))
            .await
            .unwrap();

        assert_eq!(count, 3);
        assert!(cache.verify("a@x.com", "pw-a").await);
        assert!(cache.verify("b@x.com", "pw-b").await);
        assert!(cache.verify("reporter", "rep-pw").await);
    }

    #[tokio::test]
    async fn test_load_replaces_previous_contents() {
        let cache = CredentialCache::new();
        cache.upsert("stale@x.com", "old").await;

        cache.load(&store_with(&[("a@x.com", "pw-a")]), None).await.unwrap();

        assert!(!cache.contains("stale@x.com").await);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_load_propagates_store_errors() {
        let cache = CredentialCache::new();
        let mut store = MockCredentialStore::new();
        store
            .expect_load_credentials()
            .returning(|| Err(DomainError::storage("connection refused")));

        assert!(cache.load(&store, None).await.is_err());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_secret_and_unknown_identity() {
        let cache = CredentialCache::new();
        cache.upsert("a@x.com", "pw-a").await;

        assert!(!cache.verify("a@x.com", "wrong").await);
        assert!(!cache.verify("a@x.com", "").await);
        assert!(!cache.verify("nobody@x.com", "pw-a").await);
    }

    #[tokio::test]
    async fn test_empty_secret_never_verifies() {
        let cache = CredentialCache::new();
        cache.upsert("a@x.com", "").await;

        assert!(!cache.verify("a@x.com", "").await);
    }

    #[tokio::test]
    async fn test_upsert_replaces_secret() {
        let cache = CredentialCache::new();
        cache.upsert("a@x.com", "old").await;
        cache.upsert("a@x.com", "new").await;

        assert!(!cache.verify("a@x.com", "old").await);
        assert!(cache.verify("a@x.com", "new").await);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = CredentialCache::new();
        cache.upsert("a@x.com", "pw").await;

        assert!(cache.remove("a@x.com").await);
        assert!(!cache.remove("a@x.com").await);
        assert!(!cache.verify("a@x.com", "pw").await);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
        assert!(constant_time_eq("", ""));
    }
}
