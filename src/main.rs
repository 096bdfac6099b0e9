use clap::Parser;
use volunteer_registry::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    Cli::parse().run().await
}
