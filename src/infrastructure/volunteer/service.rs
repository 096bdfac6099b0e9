//! Volunteer service: registration, self-service reads/updates and deletion

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::notification::Notifier;
use crate::domain::volunteer::{
    validate_email, validate_first_name, validate_last_name, validate_password, Volunteer,
    VolunteerRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::credentials::CredentialCache;

use super::password::PasswordGenerator;

/// Request for registering a new volunteer
#[derive(Debug, Clone)]
pub struct CreateVolunteerRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request for updating a volunteer.
///
/// `email` is validated but never applied; an empty `password` keeps the stored one.
#[derive(Clone)]
pub struct UpdateVolunteerRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl std::fmt::Debug for UpdateVolunteerRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateVolunteerRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Volunteer service
pub struct VolunteerService {
    repository: Arc<dyn VolunteerRepository>,
    credentials: Arc<CredentialCache>,
    notifier: Arc<dyn Notifier>,
    generator: PasswordGenerator,
    notify_timeout: Duration,
}

impl std::fmt::Debug for VolunteerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolunteerService")
            .field("repository", &self.repository)
            .field("notifier", &self.notifier.notifier_name())
            .field("generator", &self.generator)
            .field("notify_timeout", &self.notify_timeout)
            .finish_non_exhaustive()
    }
}

impl VolunteerService {
    pub fn new(
        repository: Arc<dyn VolunteerRepository>,
        credentials: Arc<CredentialCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            credentials,
            notifier,
            generator: PasswordGenerator::default(),
            notify_timeout: Duration::from_secs(10),
        }
    }

    /// Bound on the password notice send (builder pattern)
    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }

    /// Register a volunteer with a freshly generated password.
    ///
    /// The password notice is best effort: a failed send is logged and the
    /// registration still succeeds.
    pub async fn create(&self, request: CreateVolunteerRequest) -> Result<Volunteer, DomainError> {
        let password = self.generator.generate();

        let volunteer = Volunteer::new(
            request.email,
            request.first_name,
            request.last_name,
            password,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        let created = self.repository.create(volunteer).await?;

        self.credentials
            .upsert(created.email(), created.password())
            .await;

        info!(email = %created.email(), id = created.id(), "Volunteer registered");

        self.send_notice(created.email(), created.password()).await;

        Ok(created)
    }

    async fn send_notice(&self, recipient: &str, password: &str) {
        let send = self.notifier.send_password(recipient, password);

        match tokio::time::timeout(self.notify_timeout, send).await {
            Ok(Ok(())) => {
                info!(
                    recipient = %recipient,
                    notifier = self.notifier.notifier_name(),
                    "Password notice sent"
                );
            }
            Ok(Err(e)) => {
                error!(
                    recipient = %recipient,
                    notifier = self.notifier.notifier_name(),
                    error = %e,
                    "Failed to send password notice"
                );
            }
            Err(_) => {
                error!(
                    recipient = %recipient,
                    notifier = self.notifier.notifier_name(),
                    timeout_ms = self.notify_timeout.as_millis() as u64,
                    "Password notice timed out"
                );
            }
        }
    }

    /// Get a volunteer; only the volunteer may read their own record
    pub async fn get(&self, email: &str, caller: &str) -> Result<Volunteer, DomainError> {
        let volunteer = self.find(email).await?;
        ensure_owner(&volunteer, caller)?;
        Ok(volunteer)
    }

    /// List all volunteers
    pub async fn list(&self) -> Result<Vec<Volunteer>, DomainError> {
        self.repository.list().await
    }

    /// Update a volunteer's names and optionally password
    pub async fn update(
        &self,
        email: &str,
        request: UpdateVolunteerRequest,
        caller: &str,
    ) -> Result<Volunteer, DomainError> {
        validate_update(&request)?;

        let stored = self.find(email).await?;

        let merged = stored
            .overlay(request.first_name, request.last_name, &request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        ensure_owner(&merged, caller)?;

        let updated = self.repository.update(&merged).await.map_err(|e| {
            warn!(email = %email, error = %e, "Failed to persist volunteer update");
            DomainError::conflict(format!("Failed to update volunteer '{}'", email))
        })?;

        self.credentials
            .upsert(updated.email(), updated.password())
            .await;

        info!(email = %updated.email(), "Volunteer updated");
        Ok(updated)
    }

    /// Delete a volunteer and forget their credential
    pub async fn delete(&self, email: &str, caller: &str) -> Result<(), DomainError> {
        let volunteer = self.find(email).await?;
        ensure_owner(&volunteer, caller)?;

        self.repository.delete(volunteer.email()).await?;
        self.credentials.remove(volunteer.email()).await;

        info!(email = %volunteer.email(), "Volunteer deleted");
        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Volunteer, DomainError> {
        self.repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Volunteer '{}' not found", email)))
    }
}

fn validate_update(request: &UpdateVolunteerRequest) -> Result<(), DomainError> {
    validate_email(&request.email)
        .and_then(|_| validate_first_name(&request.first_name))
        .and_then(|_| validate_last_name(&request.last_name))
        .and_then(|_| validate_password(&request.password))
        .map_err(|e| DomainError::validation(e.to_string()))
}

fn ensure_owner(volunteer: &Volunteer, caller: &str) -> Result<(), DomainError> {
    if volunteer.is_owned_by(caller) {
        Ok(())
    } else {
        Err(DomainError::unauthorized(format!(
            "'{}' may not access volunteer '{}'",
            caller,
            volunteer.email()
        )))
    }
}
