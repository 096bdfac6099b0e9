//! Storage factory for runtime backend selection

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::config::{DatabaseConfig, StorageBackend};
use crate::domain::credentials::CredentialStore;
use crate::domain::team::TeamRepository;
use crate::domain::volunteer::VolunteerRepository;
use crate::domain::DomainError;
use crate::infrastructure::team::PostgresTeamRepository;
use crate::infrastructure::volunteer::PostgresVolunteerRepository;

use super::in_memory::InMemoryStore;
use super::migrations::run_schema_migrations;
use super::postgres::{connect_pool, ping};

/// Repository handles for one storage backend
#[derive(Debug, Clone)]
pub struct Repositories {
    pub volunteers: Arc<dyn VolunteerRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub credentials: Arc<dyn CredentialStore>,
    pool: Option<PgPool>,
}

impl Repositories {
    /// Name of the active backend for logging
    pub fn backend(&self) -> StorageBackend {
        if self.pool.is_some() {
            StorageBackend::Postgres
        } else {
            StorageBackend::Memory
        }
    }

    /// Apply pending schema migrations; returns how many ran
    pub async fn migrate(&self) -> Result<usize, DomainError> {
        match &self.pool {
            Some(pool) => run_schema_migrations(pool).await,
            None => Ok(0),
        }
    }

    /// Check the backend answers a trivial query
    pub async fn ping(&self) -> Result<(), DomainError> {
        match &self.pool {
            Some(pool) => ping(pool).await,
            None => Ok(()),
        }
    }

    /// The connection pool, when backed by PostgreSQL
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }
}

/// Factory for creating repositories
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates repositories for the configured backend
    pub async fn create(config: &DatabaseConfig) -> Result<Repositories, DomainError> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let pool = connect_pool(config).await?;
                Ok(Self::postgres(pool, config))
            }
        }
    }

    /// Creates repositories sharing one in-memory store
    pub fn in_memory() -> Repositories {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    /// Creates repositories over an existing in-memory store
    pub fn from_store(store: Arc<InMemoryStore>) -> Repositories {
        Repositories {
            volunteers: store.clone(),
            teams: store.clone(),
            credentials: store,
            pool: None,
        }
    }

    /// Creates PostgreSQL repositories over `pool`
    pub fn postgres(pool: PgPool, config: &DatabaseConfig) -> Repositories {
        let volunteers = Arc::new(PostgresVolunteerRepository::new(
            pool.clone(),
            config.credentials_query.clone(),
        ));

        Repositories {
            volunteers: volunteers.clone(),
            teams: Arc::new(PostgresTeamRepository::new(
                pool.clone(),
                config.assignment_query.clone(),
            )),
            credentials: volunteers,
            pool: Some(pool),
        }
    }
}
