//! Migrate command - applies or reverts the Postgres schema

use anyhow::{bail, Context};
use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::infrastructure::logging;
use crate::infrastructure::storage::{connect_pool, revert_last_migration, run_schema_migrations};

pub async fn run(config: AppConfig, revert: bool) -> anyhow::Result<()> {
    ensure_postgres(&config)?;
    logging::init_logging(&config.logging);

    let pool = connect_pool(&config.database)
        .await
        .context("failed to connect to database")?;

    if revert {
        match revert_last_migration(&pool).await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migration to revert"),
        }
    } else {
        let applied = run_schema_migrations(&pool).await?;
        info!(applied, "Migrations complete");
    }

    pool.close().await;

    Ok(())
}

fn ensure_postgres(config: &AppConfig) -> anyhow::Result<()> {
    if config.database.backend != StorageBackend::Postgres {
        bail!("migrations require the postgres backend");
    }

    Ok(())
}
