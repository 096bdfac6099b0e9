//! Team repository trait

use async_trait::async_trait;

use super::entity::{Assignment, Team};
use crate::domain::DomainError;

/// Repository for managing teams and their volunteer assignments
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by identifier, with its assignments loaded
    async fn get_by_identifier(&self, identifier: &str) -> Result<Option<Team>, DomainError>;

    /// Create a new team, returning it with its assigned identifier.
    ///
    /// Fails with `DomainError::Conflict` when the identifier is already taken.
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team by identifier together with its assignments
    async fn delete(&self, identifier: &str) -> Result<bool, DomainError>;

    /// List all teams with their assignments loaded
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// Look up the assignment of `email` to the team named `identifier`
    async fn find_assignment(
        &self,
        identifier: &str,
        email: &str,
    ) -> Result<Option<Assignment>, DomainError>;

    /// Insert an assignment
    async fn add_assignment(&self, assignment: Assignment) -> Result<Assignment, DomainError>;

    /// Delete the exact (team, email) assignment
    async fn remove_assignment(&self, assignment: &Assignment) -> Result<bool, DomainError>;
}
