//! Command-line interface for nim_server.

use clap::{Parser, Subcommand};
use nim_server::{ConfigOverrides, StorageKind};
use std::path::PathBuf;

/// Nim Server - misère Nim against the computer over HTTP
#[derive(Parser, Debug)]
#[command(name = "nim_server")]
#[command(about = "Misère Nim game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "nim.toml")]
        config: PathBuf,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Storage backend
        #[arg(long, value_enum)]
        storage: Option<StorageKind>,

        /// SQLite database file
        #[arg(long)]
        database_path: Option<String>,

        /// Seed for the computer's moves
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Apply database migrations and exit
    Migrate {
        /// SQLite database file
        #[arg(long, default_value = "nim.db")]
        database_path: String,
    },
}

impl Command {
    /// Collects the `serve` flags as config overrides.
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            Command::Serve {
                host,
                port,
                storage,
                database_path,
                seed,
                ..
            } => ConfigOverrides {
                host: host.clone(),
                port: *port,
                storage: *storage,
                database_path: database_path.clone(),
                seed: *seed,
            },
            Command::Migrate { .. } => ConfigOverrides::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags_become_overrides() {
        let cli = Cli::parse_from([
            "nim_server",
            "serve",
            "--port",
            "9000",
            "--storage",
            "memory",
            "--seed",
            "5",
        ]);
        let overrides = cli.command.overrides();
        assert_eq!(overrides.port, Some(9000));
        assert_eq!(overrides.storage, Some(StorageKind::Memory));
        assert_eq!(overrides.seed, Some(5));
        assert!(overrides.host.is_none());
    }

    #[test]
    fn test_migrate_defaults() {
        let cli = Cli::parse_from(["nim_server", "migrate"]);
        match cli.command {
            Command::Migrate { database_path } => assert_eq!(database_path, "nim.db"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
