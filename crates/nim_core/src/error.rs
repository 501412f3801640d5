//! Engine and storage error types.

use crate::{GameId, MoveError};
use derive_more::{Display, Error};
use tracing::instrument;

/// Storage failure with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Everything a game operation can fail with.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// Game creation arguments were not both at least one.
    #[display(
        "Invalid parameters to start a game. totalMatches: {total_matches} and maxMatchesPerTurn: {max_matches_per_turn}"
    )]
    InvalidParameters {
        /// Requested heap size.
        total_matches: u32,
        /// Requested per-turn limit.
        max_matches_per_turn: u32,
    },

    /// No game is stored under the id.
    #[display("Cannot find game state with {_0} id")]
    NotFound(GameId),

    /// The move breaks turn ownership, the per-turn limit or the heap size.
    #[display("{_0}")]
    #[from]
    InvalidMove(MoveError),

    /// The store failed.
    #[display("{_0}")]
    #[from]
    Store(StoreError),

    /// A computed state broke a game invariant.
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}

impl GameError {
    /// True for failures caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GameError::InvalidParameters { .. } | GameError::NotFound(_) | GameError::InvalidMove(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_tracks_location() {
        let err = StoreError::new("disk full");
        assert_eq!(err.message, "disk full");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_move_error_converts() {
        let err: GameError = MoveError::ExceedsHeap { count: 3, heap: 2 }.into();
        assert!(matches!(err, GameError::InvalidMove(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_store_error_is_not_client_error() {
        let err: GameError = StoreError::new("boom").into();
        assert!(!err.is_client_error());
    }
}
