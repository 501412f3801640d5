//! Nim Server - CLI entry point

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use nim_server::{GameRepository, ServerConfig, build_engine};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,nim_server=debug")),
        )
        .init();

    let cli = Cli::parse();
    let overrides = cli.command.overrides();

    match cli.command {
        Command::Serve { config, .. } => {
            let config = ServerConfig::load(Some(&config), overrides)?;
            run_server(config).await
        }
        Command::Migrate { database_path } => run_migrations(database_path),
    }
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_server(config: ServerConfig) -> Result<()> {
    info!("Starting Nim server");
    let engine = build_engine(&config)?;
    nim_server::serve(&config, engine).await
}

/// Apply schema migrations
#[instrument]
fn run_migrations(database_path: String) -> Result<()> {
    let repository = GameRepository::new(database_path)?;
    let applied = repository.run_migrations()?;
    info!(applied, path = %repository.db_path(), "Database ready");
    Ok(())
}
