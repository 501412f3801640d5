//! Core domain types for Nim.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Message stored after an accepted move that leaves matches in the heap.
pub const MOVE_SUCCESSFUL: &str = "Move successful!";

/// Message stored when the computer takes the last match.
pub const PLAYER_WINNER: &str = "Player won. The computer took the last match";

/// Message stored when the player takes the last match.
pub const COMPUTER_WINNER: &str = "Computer won. The player took the last match";

/// Message stored after a game is reset.
pub const GAME_RESET: &str = "Game resettled to default configuration";

/// One side of the table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerType {
    /// The human player. Always moves first.
    Player,
    /// The automated opponent.
    Computer,
}

impl PlayerType {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            PlayerType::Player => PlayerType::Computer,
            PlayerType::Computer => PlayerType::Player,
        }
    }

    /// Lowercase name for log lines and error messages.
    pub fn label(self) -> &'static str {
        match self {
            PlayerType::Player => "player",
            PlayerType::Computer => "computer",
        }
    }

    /// Message recorded when this side wins.
    fn victory_message(self) -> &'static str {
        match self {
            PlayerType::Player => PLAYER_WINNER,
            PlayerType::Computer => COMPUTER_WINNER,
        }
    }
}

/// Opaque game identifier, assigned by the store on first save.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Complete state of one Nim game.
///
/// This is the persisted record and also the body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Identifier, `None` until the state is first saved.
    game_id: Option<GameId>,
    /// Heap size at the start of the game.
    total_matches: u32,
    /// Most matches a side may take in one turn.
    max_matches_per_turn: u32,
    /// Matches still in play.
    matches_in_heap: u32,
    /// Side to move next.
    current_player: PlayerType,
    /// Set once the heap is empty.
    is_game_over: bool,
    /// The side that did not take the last match.
    winner: Option<PlayerType>,
    /// Outcome of the most recent operation.
    message: Option<String>,
}

impl GameState {
    /// Creates an unsaved game with a full heap and the player to move.
    #[instrument]
    pub fn new(total_matches: u32, max_matches_per_turn: u32) -> Self {
        Self {
            game_id: None,
            total_matches,
            max_matches_per_turn,
            matches_in_heap: total_matches,
            current_player: PlayerType::Player,
            is_game_over: false,
            winner: None,
            message: None,
        }
    }

    /// Rebuilds a state from its stored fields.
    ///
    /// Used by store implementations; no rule is checked here.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        game_id: GameId,
        total_matches: u32,
        max_matches_per_turn: u32,
        matches_in_heap: u32,
        current_player: PlayerType,
        is_game_over: bool,
        winner: Option<PlayerType>,
        message: Option<String>,
    ) -> Self {
        Self {
            game_id: Some(game_id),
            total_matches,
            max_matches_per_turn,
            matches_in_heap,
            current_player,
            is_game_over,
            winner,
            message,
        }
    }

    /// Returns this state with the given identifier.
    pub fn with_game_id(mut self, game_id: GameId) -> Self {
        self.game_id = Some(game_id);
        self
    }

    /// Returns this state with `message` replaced.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Checks whether `side` is the one to move.
    pub fn is_turn_of(&self, side: PlayerType) -> bool {
        self.current_player == side
    }

    /// Removes `count` matches on behalf of `side` and passes the turn.
    ///
    /// Unchecked: callers validate with [`crate::TakeContract`] first.
    pub(crate) fn apply_take(&mut self, side: PlayerType, count: u32) {
        self.matches_in_heap -= count;

        if self.matches_in_heap == 0 {
            let winner = side.opponent();
            self.is_game_over = true;
            self.winner = Some(winner);
            self.message = Some(winner.victory_message().to_string());
        } else {
            self.message = Some(MOVE_SUCCESSFUL.to_string());
        }

        // The turn passes even on the losing move.
        self.current_player = side.opponent();
    }

    /// Restores the given configuration with a full heap, keeping the id.
    pub(crate) fn reset_to(&mut self, total_matches: u32, max_matches_per_turn: u32) {
        self.total_matches = total_matches;
        self.max_matches_per_turn = max_matches_per_turn;
        self.matches_in_heap = total_matches;
        self.current_player = PlayerType::Player;
        self.is_game_over = false;
        self.winner = None;
        self.message = Some(GAME_RESET.to_string());
    }
}
