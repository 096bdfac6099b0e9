//! Command line entry points
//!
//! - `serve`: apply migrations, load credentials and serve HTTP
//! - `migrate`: apply (or revert) schema migrations and exit

pub mod migrate;
pub mod serve;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Volunteer Registry - volunteers, teams and team assignments
#[derive(Parser)]
#[command(name = "volunteer-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file layered over config/default and config/local
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply pending schema migrations
    Migrate {
        /// Revert the most recent migration instead
        #[arg(long)]
        revert: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = load_config(self.config.as_deref())?;

        match self.command {
            Command::Serve => serve::run(config).await,
            Command::Migrate { revert } => migrate::run(config, revert).await,
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    AppConfig::load(path).context("failed to load configuration")
}
