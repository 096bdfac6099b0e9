//! PostgreSQL volunteer repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::credentials::{Credential, CredentialStore};
use crate::domain::volunteer::{Volunteer, VolunteerRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::map_write_error;

/// PostgreSQL implementation of VolunteerRepository.
///
/// Also serves as the credential store, reading pairs through a configurable
/// query that must return `(email, password)` rows.
#[derive(Debug, Clone)]
pub struct PostgresVolunteerRepository {
    pool: PgPool,
    credentials_query: String,
}

impl PostgresVolunteerRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool, credentials_query: impl Into<String>) -> Self {
        Self {
            pool,
            credentials_query: credentials_query.into(),
        }
    }
}

#[async_trait]
impl VolunteerRepository for PostgresVolunteerRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<Volunteer>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, first_name, last_name, password
            FROM volunteers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get volunteer: {}", e)))?;

        row.as_ref().map(row_to_volunteer).transpose()
    }

    async fn create(&self, volunteer: Volunteer) -> Result<Volunteer, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO volunteers (email, first_name, last_name, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(volunteer.email())
        .bind(volunteer.first_name())
        .bind(volunteer.last_name())
        .bind(volunteer.password())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("Volunteer '{}' already exists", volunteer.email())
            })
        })?;

        Ok(volunteer.with_id(id))
    }

    async fn update(&self, volunteer: &Volunteer) -> Result<Volunteer, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE volunteers
            SET first_name = $3, last_name = $4, password = $5
            WHERE id = $1 AND email = $2
            "#,
        )
        .bind(volunteer.id())
        .bind(volunteer.email())
        .bind(volunteer.first_name())
        .bind(volunteer.last_name())
        .bind(volunteer.password())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update volunteer: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Volunteer '{}' not found",
                volunteer.email()
            )));
        }

        Ok(volunteer.clone())
    }

    async fn delete(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM volunteers WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete volunteer: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Volunteer>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, first_name, last_name, password
            FROM volunteers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list volunteers: {}", e)))?;

        rows.iter().map(row_to_volunteer).collect()
    }
}

#[async_trait]
impl CredentialStore for PostgresVolunteerRepository {
    async fn load_credentials(&self) -> Result<Vec<Credential>, DomainError> {
        let rows = sqlx::query(&self.credentials_query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to load credentials: {}", e)))?;

        rows.iter()
            .map(|row| {
                let identity: String = row.try_get(0).map_err(decode_error)?;
                let secret: String = row.try_get(1).map_err(decode_error)?;
                Ok(Credential::new(identity, secret))
            })
            .collect()
    }
}

fn row_to_volunteer(row: &PgRow) -> Result<Volunteer, DomainError> {
    Ok(Volunteer::from_stored(
        row.try_get("id").map_err(decode_error)?,
        row.try_get("email").map_err(decode_error)?,
        row.try_get("first_name").map_err(decode_error)?,
        row.try_get("last_name").map_err(decode_error)?,
        row.try_get("password").map_err(decode_error)?,
    ))
}

fn decode_error(e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to decode volunteer row: {}", e))
}
