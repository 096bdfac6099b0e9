//! Team service for team management and volunteer assignments

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::team::{validate_assignment_email, Assignment, Team, TeamRepository};
use crate::domain::DomainError;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub identifier: String,
    pub name: String,
}

/// Team service for managing teams
#[derive(Debug)]
pub struct TeamService {
    repository: Arc<dyn TeamRepository>,
}

impl TeamService {
    /// Create a new team service
    pub fn new(repository: Arc<dyn TeamRepository>) -> Self {
        Self { repository }
    }

    /// Create a new team
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(identifier = %request.identifier, "Creating team");

        let team = Team::new(request.identifier, request.name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository.create(team).await
    }

    /// Get a team with its assignments
    pub async fn get(&self, identifier: &str) -> Result<Team, DomainError> {
        self.repository
            .get_by_identifier(identifier)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", identifier)))
    }

    /// List all teams with their assignments
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.repository.list().await
    }

    /// Delete a team; its assignments go with it
    pub async fn delete(&self, identifier: &str) -> Result<(), DomainError> {
        if !self.repository.delete(identifier).await? {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                identifier
            )));
        }

        info!(identifier = %identifier, "Team deleted");
        Ok(())
    }

    /// Assign the volunteer with `email` to the team named `identifier`
    pub async fn assign(&self, identifier: &str, email: &str) -> Result<Assignment, DomainError> {
        validate_assignment_email(email).map_err(|e| DomainError::validation(e.to_string()))?;

        match self.repository.find_assignment(identifier, email).await {
            Ok(Some(_)) => {
                return Err(DomainError::conflict(format!(
                    "'{}' is already assigned to team '{}'",
                    email, identifier
                )));
            }
            Ok(None) => {}
            Err(e) => return Err(internal("Assignment lookup failed", identifier, email, e)),
        }

        let team = self.resolve(identifier, email).await?;

        let assignment = Assignment::new(team.id(), email)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let created = self
            .repository
            .add_assignment(assignment)
            .await
            .map_err(|e| internal("Failed to store assignment", identifier, email, e))?;

        info!(team = %identifier, volunteer = %email, "Volunteer assigned");
        Ok(created)
    }

    /// Remove the volunteer with `email` from the team named `identifier`
    pub async fn deassign(&self, identifier: &str, email: &str) -> Result<Assignment, DomainError> {
        validate_assignment_email(email).map_err(|e| DomainError::validation(e.to_string()))?;

        match self.repository.find_assignment(identifier, email).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(DomainError::not_found(format!(
                    "'{}' is not assigned to team '{}'",
                    email, identifier
                )));
            }
            Err(e) => return Err(internal("Assignment lookup failed", identifier, email, e)),
        }

        let team = self.resolve(identifier, email).await?;
        let assignment = Assignment::from_stored(team.id(), email.to_string());

        let removed = self
            .repository
            .remove_assignment(&assignment)
            .await
            .map_err(|e| internal("Failed to remove assignment", identifier, email, e))?;

        debug!(team = %identifier, volunteer = %email, removed, "Assignment removal finished");
        info!(team = %identifier, volunteer = %email, "Volunteer deassigned");
        Ok(assignment)
    }

    async fn resolve(&self, identifier: &str, email: &str) -> Result<Team, DomainError> {
        match self.repository.get_by_identifier(identifier).await {
            Ok(Some(team)) => Ok(team),
            Ok(None) => Err(internal(
                "Team could not be resolved",
                identifier,
                email,
                DomainError::not_found(identifier),
            )),
            Err(e) => Err(internal("Team could not be resolved", identifier, email, e)),
        }
    }
}

fn internal(context: &str, identifier: &str, email: &str, cause: DomainError) -> DomainError {
    error!(team = %identifier, volunteer = %email, error = %cause, "{}", context);
    DomainError::internal(format!("{}: {}", context, cause))
}
