//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::notification::NotifierFactory;
use crate::infrastructure::storage::StorageFactory;

/// Run the API server until the process is stopped
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    logging::init_logging(&config.logging);

    let repositories = StorageFactory::create(&config.database)
        .await
        .context("failed to open storage")?;

    let applied = repositories
        .migrate()
        .await
        .context("failed to apply migrations")?;
    info!(applied, backend = ?repositories.backend(), "Storage ready");

    let notifier = NotifierFactory::create(&config.email).context("failed to set up mail")?;
    info!(notifier = notifier.notifier_name(), "Notifier ready");

    let state = AppState::build(&config, repositories, notifier)
        .await
        .context("failed to build application state")?;
    info!(credentials = state.credentials.len().await, "Credential cache loaded");

    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    let ip = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("invalid server host {:?}", config.server.host))?;

    Ok(SocketAddr::from((ip, config.server.port)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_socket_addr() {
        let addr = build_socket_addr(&AppConfig::default()).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_build_socket_addr_rejects_hostname() {
        let mut config = AppConfig::default();
        config.server.host = "localhost".to_string();

        assert!(build_socket_addr(&config).is_err());
    }
}
