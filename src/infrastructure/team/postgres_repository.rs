//! PostgreSQL team repository implementation

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::team::{Assignment, Team, TeamId, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::map_write_error;

/// PostgreSQL implementation of TeamRepository.
///
/// Assignment lookups go through a configurable query binding `$1` = volunteer
/// email and `$2` = team identifier, returning `(team_id, volunteer_email)` rows.
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
    assignment_query: String,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool, assignment_query: impl Into<String>) -> Self {
        Self {
            pool,
            assignment_query: assignment_query.into(),
        }
    }

    async fn assignments_of(&self, team_id: TeamId) -> Result<Vec<Assignment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT team_id, volunteer_email
            FROM volunteer_emails
            WHERE team_id = $1
            ORDER BY volunteer_email
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load assignments: {}", e)))?;

        rows.iter().map(row_to_assignment).collect()
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get_by_identifier(&self, identifier: &str) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, identifier, name FROM teams WHERE identifier = $1")
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let team = row_to_team(&row)?;
        let assignments = self.assignments_of(team.id()).await?;

        Ok(Some(team.with_assignments(assignments)))
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO teams (identifier, name) VALUES ($1, $2) RETURNING id",
        )
        .bind(team.identifier())
        .bind(team.name())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || format!("Team '{}' already exists", team.identifier()))
        })?;

        Ok(team.with_id(id).with_assignments(Vec::new()))
    }

    async fn delete(&self, identifier: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE identifier = $1")
            .bind(identifier)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let team_rows = sqlx::query("SELECT id, identifier, name FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        let assignment_rows = sqlx::query(
            "SELECT team_id, volunteer_email FROM volunteer_emails ORDER BY volunteer_email",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list assignments: {}", e)))?;

        let mut by_team: HashMap<TeamId, Vec<Assignment>> = HashMap::new();

        for row in &assignment_rows {
            let assignment = row_to_assignment(row)?;
            by_team
                .entry(assignment.team_id())
                .or_default()
                .push(assignment);
        }

        team_rows
            .iter()
            .map(|row| {
                let team = row_to_team(row)?;
                let assignments = by_team.remove(&team.id()).unwrap_or_default();
                Ok(team.with_assignments(assignments))
            })
            .collect()
    }

    async fn find_assignment(
        &self,
        identifier: &str,
        email: &str,
    ) -> Result<Option<Assignment>, DomainError> {
        let row = sqlx::query(&self.assignment_query)
            .bind(email)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to look up assignment: {}", e)))?;

        row.as_ref().map(row_to_assignment).transpose()
    }

    async fn add_assignment(&self, assignment: Assignment) -> Result<Assignment, DomainError> {
        sqlx::query("INSERT INTO volunteer_emails (team_id, volunteer_email) VALUES ($1, $2)")
            .bind(assignment.team_id())
            .bind(assignment.volunteer_email())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(e, || {
                    format!(
                        "'{}' is already assigned to team {}",
                        assignment.volunteer_email(),
                        assignment.team_id()
                    )
                })
            })?;

        Ok(assignment)
    }

    async fn remove_assignment(&self, assignment: &Assignment) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM volunteer_emails WHERE volunteer_email = $1 AND team_id = $2",
        )
        .bind(assignment.volunteer_email())
        .bind(assignment.team_id())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to remove assignment: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_team(row: &PgRow) -> Result<Team, DomainError> {
    Ok(Team::from_stored(
        row.try_get("id").map_err(decode_error)?,
        row.try_get("identifier").map_err(decode_error)?,
        row.try_get("name").map_err(decode_error)?,
    ))
}

fn row_to_assignment(row: &PgRow) -> Result<Assignment, DomainError> {
    Ok(Assignment::from_stored(
        row.try_get(0).map_err(decode_error)?,
        row.try_get(1).map_err(decode_error)?,
    ))
}

fn decode_error(e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to decode team row: {}", e))
}
