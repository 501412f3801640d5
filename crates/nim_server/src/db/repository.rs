//! SQLite repository for game states.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use nim_core::{GameId, GameState, GameStore, StoreError};
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameRecord, GameRow, schema};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for game states.
///
/// Opens a fresh connection per operation, so `":memory:"` does not keep
/// data between calls. Use a file path.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies pending schema migrations, returning how many ran.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;

        info!(count = applied.len(), "Migrations applied");
        Ok(applied.len())
    }

    /// Inserts or overwrites a game, assigning an id to a new one.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, state), fields(game_id = ?state.game_id()))]
    pub fn save_game(&self, state: GameState) -> Result<GameState, DbError> {
        let id = state.game_id().clone().unwrap_or_else(GameId::generate);
        let row = GameRow::from_state(&id, &state);
        debug!(game_id = %id, "Saving game");
        let mut conn = self.connection()?;

        let record = diesel::insert_into(schema::games::table)
            .values(&row)
            .on_conflict(schema::games::id)
            .do_update()
            .set(&row)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        let saved = record.into_state()?;
        info!(game_id = %id, matches_in_heap = saved.matches_in_heap(), "Game saved");
        Ok(saved)
    }

    /// Gets a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or the row is corrupt.
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn find_game(&self, id: &GameId) -> Result<Option<GameState>, DbError> {
        debug!("Looking up game");
        let mut conn = self.connection()?;

        let record = schema::games::table
            .find(id.as_str())
            .select(GameRecord::as_select())
            .first(&mut conn)
            .optional()?;

        match record {
            Some(record) => {
                debug!("Game found");
                record.into_state().map(Some)
            }
            None => {
                debug!("Game not found");
                Ok(None)
            }
        }
    }

    /// Checks whether a game is stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn game_exists(&self, id: &GameId) -> Result<bool, DbError> {
        let mut conn = self.connection()?;
        let count: i64 = schema::games::table
            .filter(schema::games::id.eq(id.as_str()))
            .count()
            .get_result(&mut conn)?;
        Ok(count > 0)
    }

    /// Counts stored games.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn count_games(&self) -> Result<i64, DbError> {
        let mut conn = self.connection()?;
        let count = schema::games::table.count().get_result(&mut conn)?;
        debug!(count, "Games counted");
        Ok(count)
    }
}

impl GameStore for GameRepository {
    fn save(&self, state: GameState) -> Result<GameState, StoreError> {
        self.save_game(state).map_err(StoreError::from)
    }

    fn find_by_id(&self, id: &GameId) -> Result<Option<GameState>, StoreError> {
        self.find_game(id).map_err(StoreError::from)
    }

    fn exists(&self, id: &GameId) -> Result<bool, StoreError> {
        self.game_exists(id).map_err(StoreError::from)
    }
}
