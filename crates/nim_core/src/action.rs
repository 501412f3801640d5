//! First-class move types for Nim.
//!
//! A take is the mover's intent. It is validated against a state before it
//! is applied, so a rejected take never touches the heap.

use crate::PlayerType;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A side removing matches from the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Take {
    side: PlayerType,
    count: u32,
}

impl Take {
    /// Creates a new take.
    #[instrument]
    pub fn new(side: PlayerType, count: u32) -> Self {
        Self { side, count }
    }

    /// Returns the side making this move.
    pub fn side(&self) -> PlayerType {
        self.side
    }

    /// Returns the number of matches taken.
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl std::fmt::Display for Take {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} takes {}", self.side.label(), self.count)
    }
}

/// Why a take was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The mover does not own the turn.
    #[display("Invalid move, it is the {} turn to play.", _0.opponent().label())]
    NotYourTurn(PlayerType),

    /// The count is zero or above the per-turn limit.
    #[display("The number of matches taken must be between 1 and {max}, got {count}")]
    OutsideTurnLimit {
        /// Requested count.
        count: u32,
        /// Per-turn limit of the game.
        max: u32,
    },

    /// The count is larger than what is left in the heap.
    #[display("Number of matches taken {count} are above the number of matches in heap {heap}")]
    ExceedsHeap {
        /// Requested count.
        count: u32,
        /// Matches left in the heap.
        heap: u32,
    },
}

impl std::error::Error for MoveError {}
