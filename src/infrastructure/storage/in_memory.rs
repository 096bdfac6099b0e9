//! In-memory storage implementation
//!
//! Useful for testing and local runs. Data is lost when the process terminates.
//! Enforces the same constraints as the relational schema: unique volunteer
//! emails and team identifiers, assignments referencing existing rows, one
//! assignment per (team, email) pair, and cascading deletes.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::credentials::{Credential, CredentialStore};
use crate::domain::team::{Assignment, Team, TeamId, TeamRepository};
use crate::domain::volunteer::{Volunteer, VolunteerId, VolunteerRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Tables {
    volunteers: BTreeMap<VolunteerId, Volunteer>,
    teams: BTreeMap<TeamId, Team>,
    assignments: Vec<Assignment>,
    next_volunteer_id: VolunteerId,
    next_team_id: TeamId,
}

impl Tables {
    fn volunteer_by_email(&self, email: &str) -> Option<&Volunteer> {
        self.volunteers.values().find(|v| v.email() == email)
    }

    fn team_by_identifier(&self, identifier: &str) -> Option<&Team> {
        self.teams.values().find(|t| t.identifier() == identifier)
    }

    fn with_assignments(&self, team: &Team) -> Team {
        let assignments = self
            .assignments
            .iter()
            .filter(|a| a.team_id() == team.id())
            .cloned()
            .collect();

        team.clone().with_assignments(assignments)
    }
}

/// Thread-safe in-memory store backing every repository trait
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VolunteerRepository for InMemoryStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<Volunteer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.volunteer_by_email(email).cloned())
    }

    async fn create(&self, volunteer: Volunteer) -> Result<Volunteer, DomainError> {
        let mut tables = self.tables.write().await;

        if tables.volunteer_by_email(volunteer.email()).is_some() {
            return Err(DomainError::conflict(format!(
                "Volunteer '{}' already exists",
                volunteer.email()
            )));
        }

        tables.next_volunteer_id += 1;
        let created = volunteer.with_id(tables.next_volunteer_id);
        tables.volunteers.insert(created.id(), created.clone());

        Ok(created)
    }

    async fn update(&self, volunteer: &Volunteer) -> Result<Volunteer, DomainError> {
        let mut tables = self.tables.write().await;

        match tables.volunteers.get_mut(&volunteer.id()) {
            Some(stored) if stored.email() == volunteer.email() => {
                *stored = volunteer.clone();
                Ok(volunteer.clone())
            }
            Some(_) => Err(DomainError::conflict(format!(
                "Volunteer {} cannot change its email",
                volunteer.id()
            ))),
            None => Err(DomainError::not_found(format!(
                "Volunteer '{}' not found",
                volunteer.email()
            ))),
        }
    }

    async fn delete(&self, email: &str) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;

        let Some(id) = tables.volunteer_by_email(email).map(Volunteer::id) else {
            return Ok(false);
        };

        tables.volunteers.remove(&id);
        tables.assignments.retain(|a| a.volunteer_email() != email);

        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Volunteer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.volunteers.values().cloned().collect())
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn get_by_identifier(&self, identifier: &str) -> Result<Option<Team>, DomainError> {
        let tables = self.tables.read().await;

        Ok(tables
            .team_by_identifier(identifier)
            .map(|team| tables.with_assignments(team)))
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let mut tables = self.tables.write().await;

        if tables.team_by_identifier(team.identifier()).is_some() {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.identifier()
            )));
        }

        tables.next_team_id += 1;
        let created = team.with_id(tables.next_team_id).with_assignments(Vec::new());
        tables.teams.insert(created.id(), created.clone());

        Ok(created)
    }

    async fn delete(&self, identifier: &str) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;

        let Some(id) = tables.team_by_identifier(identifier).map(Team::id) else {
            return Ok(false);
        };

        tables.teams.remove(&id);
        tables.assignments.retain(|a| a.team_id() != id);

        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let tables = self.tables.read().await;

        Ok(tables
            .teams
            .values()
            .map(|team| tables.with_assignments(team))
            .collect())
    }

    async fn find_assignment(
        &self,
        identifier: &str,
        email: &str,
    ) -> Result<Option<Assignment>, DomainError> {
        let tables = self.tables.read().await;

        let Some(team) = tables.team_by_identifier(identifier) else {
            return Ok(None);
        };

        Ok(tables
            .assignments
            .iter()
            .find(|a| a.team_id() == team.id() && a.volunteer_email() == email)
            .cloned())
    }

    async fn add_assignment(&self, assignment: Assignment) -> Result<Assignment, DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.teams.contains_key(&assignment.team_id()) {
            return Err(DomainError::storage(format!(
                "Team {} does not exist",
                assignment.team_id()
            )));
        }

        if tables.volunteer_by_email(assignment.volunteer_email()).is_none() {
            return Err(DomainError::storage(format!(
                "Volunteer '{}' does not exist",
                assignment.volunteer_email()
            )));
        }

        if tables.assignments.contains(&assignment) {
            return Err(DomainError::conflict(format!(
                "'{}' is already assigned to team {}",
                assignment.volunteer_email(),
                assignment.team_id()
            )));
        }

        tables.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn remove_assignment(&self, assignment: &Assignment) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;

        let before = tables.assignments.len();
        tables.assignments.retain(|a| a != assignment);

        Ok(tables.assignments.len() < before)
    }
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn load_credentials(&self) -> Result<Vec<Credential>, DomainError> {
        let tables = self.tables.read().await;

        Ok(tables
            .volunteers
            .values()
            .map(|v| Credential::new(v.email(), v.password()))
            .collect())
    }
}
