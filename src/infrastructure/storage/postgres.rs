//! PostgreSQL connection pooling

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

/// Connect a pool using the configured limits.
///
/// Every connection carries a `statement_timeout` so no single store call can
/// hold a request open indefinitely.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| DomainError::configuration(format!("Invalid database URL: {}", e)))?
        .options([(
            "statement_timeout",
            format!("{}", config.statement_timeout_ms),
        )]);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

    info!(
        max_connections = config.max_connections,
        statement_timeout_ms = config.statement_timeout_ms,
        "PostgreSQL pool connected"
    );

    Ok(pool)
}

/// Round trip used by the readiness probe
pub async fn ping(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| DomainError::storage(format!("Database ping failed: {}", e)))?;

    Ok(())
}

/// Translate a sqlx error, mapping unique violations to `Conflict`
pub(crate) fn map_write_error(e: sqlx::Error, conflict: impl FnOnce() -> String) -> DomainError {
    let unique = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique {
        DomainError::conflict(conflict())
    } else {
        DomainError::storage(e.to_string())
    }
}
