//! Application state for shared services

use std::sync::Arc;

use crate::config::{AppConfig, AuthConfig};
use crate::domain::credentials::Credential;
use crate::domain::notification::Notifier;
use crate::domain::DomainError;
use crate::infrastructure::credentials::CredentialCache;
use crate::infrastructure::storage::Repositories;
use crate::infrastructure::team::TeamService;
use crate::infrastructure::volunteer::VolunteerService;

use super::types::ErrorMapper;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub volunteer_service: Arc<VolunteerService>,
    pub team_service: Arc<TeamService>,
    pub credentials: Arc<CredentialCache>,
    pub auth: Arc<AuthConfig>,
    pub errors: Arc<ErrorMapper>,
    pub repositories: Repositories,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.repositories.backend())
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire services over `repositories` and fill the credential cache
    pub async fn build(
        config: &AppConfig,
        repositories: Repositories,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, DomainError> {
        let errors = ErrorMapper::from_config(&config.messages, &config.auth)?;
        let credentials = Arc::new(CredentialCache::new());

        credentials
            .load(repositories.credentials.as_ref(), reporter_credential(&config.auth))
            .await?;

        let volunteer_service = VolunteerService::new(
            repositories.volunteers.clone(),
            credentials.clone(),
            notifier,
        )
        .with_notify_timeout(std::time::Duration::from_secs(config.email.timeout_secs));

        let team_service = TeamService::new(repositories.teams.clone());

        Ok(Self {
            volunteer_service: Arc::new(volunteer_service),
            team_service: Arc::new(team_service),
            credentials,
            auth: Arc::new(config.auth.clone()),
            errors: Arc::new(errors),
            repositories,
        })
    }
}

/// The reporter pair joins the cache only when fully configured
fn reporter_credential(auth: &AuthConfig) -> Option<Credential> {
    if auth.reporter_user.is_empty() || auth.reporter_password.is_empty() {
        return None;
    }

    Some(Credential::new(
        auth.reporter_user.clone(),
        auth.reporter_password.clone(),
    ))
}
