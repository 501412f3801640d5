//! Database models and their conversions to game states.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use diesel::prelude::*;
use nim_core::{GameId, GameState, PlayerType};
use tracing::instrument;

use crate::db::{DbError, schema};

/// Stored game row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRecord {
    id: String,
    total_matches: i64,
    max_matches_per_turn: i64,
    matches_in_heap: i64,
    current_player: String,
    is_game_over: bool,
    winner: Option<String>,
    message: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRecord {
    /// Converts the row back into a game state.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a count is outside the `u32` range or a side
    /// name is unknown.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn into_state(self) -> Result<GameState, DbError> {
        let winner = self.winner.as_deref().map(parse_side).transpose()?;

        Ok(GameState::restore(
            GameId::from(self.id),
            to_count("total_matches", self.total_matches)?,
            to_count("max_matches_per_turn", self.max_matches_per_turn)?,
            to_count("matches_in_heap", self.matches_in_heap)?,
            parse_side(&self.current_player)?,
            self.is_game_over,
            winner,
            self.message,
        ))
    }
}

/// Insertable and updatable game row.
///
/// `created_at` is left to the column default so updates keep it.
#[derive(Debug, Clone, Insertable, AsChangeset, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(treat_none_as_null = true)]
pub struct GameRow {
    id: String,
    total_matches: i64,
    max_matches_per_turn: i64,
    matches_in_heap: i64,
    current_player: String,
    is_game_over: bool,
    winner: Option<String>,
    message: Option<String>,
    updated_at: NaiveDateTime,
}

impl GameRow {
    /// Builds a row for `state` stored under `id`.
    ///
    /// Every count fits its `BIGINT` column, so this cannot fail.
    #[instrument(skip(state))]
    pub fn from_state(id: &GameId, state: &GameState) -> Self {
        Self {
            id: id.as_str().to_string(),
            total_matches: i64::from(*state.total_matches()),
            max_matches_per_turn: i64::from(*state.max_matches_per_turn()),
            matches_in_heap: i64::from(*state.matches_in_heap()),
            current_player: state.current_player().to_string(),
            is_game_over: *state.is_game_over(),
            winner: state.winner().map(|side| side.to_string()),
            message: state.message().clone(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

fn parse_side(value: &str) -> Result<PlayerType, DbError> {
    value
        .parse::<PlayerType>()
        .map_err(|_| DbError::new(format!("Invalid side: '{}'", value)))
}

fn to_count(column: &str, value: i64) -> Result<u32, DbError> {
    u32::try_from(value).map_err(|_| DbError::new(format!("{} out of range: {}", column, value)))
}
