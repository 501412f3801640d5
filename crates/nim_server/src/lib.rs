//! Nim game server.
//!
//! Serves the [`nim_core`] engine over a JSON REST API and keeps games in
//! SQLite or in memory.
//!
//! # Routes
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST | `/start-game?totalMatches=N&maxMatchesPerTurn=M` | start a game |
//! | GET | `/state/{id}` | read a game |
//! | PUT | `/reset/{id}` | reset to 13 matches, 3 per turn |
//! | POST | `/player-move/{id}/{playerMoves}` | player takes matches |
//! | POST | `/computer-move/{id}` | computer takes matches |
//! | GET | `/health` | liveness |

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod db;
pub mod http;

pub use config::{ComputerConfig, ConfigError, ConfigOverrides, ServerConfig, StorageKind};
pub use db::{DbError, GameRepository};
pub use http::{ApiError, AppState, create_app, serve};

use std::sync::Arc;

use nim_core::{GameEngine, GameStore, InMemoryGameStore, RandomSource, SeededRandom, ThreadRandom};
use tracing::{info, instrument};

/// Builds the engine described by `config`.
///
/// SQLite storage runs pending migrations first.
///
/// # Errors
///
/// Returns an error if the database path is invalid or migrations fail.
#[instrument(skip(config), fields(storage = %config.storage()))]
pub fn build_engine(config: &ServerConfig) -> anyhow::Result<GameEngine> {
    let store: Arc<dyn GameStore> = match config.storage() {
        StorageKind::Memory => {
            info!("Using in-memory game store");
            Arc::new(InMemoryGameStore::new())
        }
        StorageKind::Sqlite => {
            let repository = GameRepository::new(config.database_path().clone())?;
            repository.run_migrations()?;
            info!(path = %repository.db_path(), "Using SQLite game store");
            Arc::new(repository)
        }
    };

    let random: Arc<dyn RandomSource> = match config.computer().seed() {
        Some(seed) => {
            info!(seed, "Using seeded computer RNG");
            Arc::new(SeededRandom::new(*seed))
        }
        None => Arc::new(ThreadRandom),
    };

    Ok(GameEngine::new(store, random))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_memory_engine() {
        let config = ServerConfig::default().with_overrides(ConfigOverrides {
            storage: Some(StorageKind::Memory),
            seed: Some(3),
            ..Default::default()
        });
        let engine = build_engine(&config).unwrap();
        let state = engine.start_game(5, 2).unwrap();
        assert_eq!(*state.matches_in_heap(), 5);
    }

    #[test]
    fn test_build_sqlite_engine_with_empty_path_fails() {
        let config = ServerConfig::default().with_overrides(ConfigOverrides {
            database_path: Some(String::new()),
            ..Default::default()
        });
        assert!(build_engine(&config).is_err());
    }
}
