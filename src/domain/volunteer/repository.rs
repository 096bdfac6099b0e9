//! Volunteer repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Volunteer;
use crate::domain::DomainError;

/// Repository trait for volunteer storage
#[async_trait]
pub trait VolunteerRepository: Send + Sync + Debug {
    /// Get a volunteer by email
    async fn get_by_email(&self, email: &str) -> Result<Option<Volunteer>, DomainError>;

    /// Create a new volunteer, returning it with its assigned identifier.
    ///
    /// Fails with `DomainError::Conflict` when the email is already taken.
    async fn create(&self, volunteer: Volunteer) -> Result<Volunteer, DomainError>;

    /// Persist all mutable fields of an existing volunteer
    async fn update(&self, volunteer: &Volunteer) -> Result<Volunteer, DomainError>;

    /// Delete a volunteer by email
    async fn delete(&self, email: &str) -> Result<bool, DomainError>;

    /// List all volunteers
    async fn list(&self) -> Result<Vec<Volunteer>, DomainError>;
}
