//! Misère Nim game engine.
//!
//! A game starts with a heap of matches. The player and the computer take
//! turns removing between one and `max_matches_per_turn` matches, and
//! whoever takes the last match loses.
//!
//! # Architecture
//!
//! - **Engine**: [`GameEngine`] owns the rules and the turn state machine
//! - **Store**: [`GameStore`] persists [`GameState`] by [`GameId`]
//! - **Random**: [`RandomSource`] picks the computer's move
//! - **Contracts**: move preconditions checked before a take is applied
//! - **Invariants**: state properties checked after every transition
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nim_core::{FixedRandom, GameEngine, InMemoryGameStore, PlayerType};
//!
//! # fn example() -> Result<(), nim_core::GameError> {
//! let engine = GameEngine::new(
//!     Arc::new(InMemoryGameStore::new()),
//!     Arc::new(FixedRandom::new(1)),
//! );
//!
//! let game = engine.start_game(13, 3)?;
//! let id = game.game_id().clone().expect("stored games have an id");
//!
//! let game = engine.player_move(&id, 2)?;
//! assert_eq!(*game.matches_in_heap(), 11);
//! assert_eq!(*game.current_player(), PlayerType::Computer);
//!
//! let game = engine.computer_move(&id)?;
//! assert_eq!(*game.matches_in_heap(), 10);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod engine;
mod error;
mod invariants;
mod random;
mod store;
mod types;

pub use action::{MoveError, Take};
pub use contracts::{Contract, LegalTake, SidesTurn, TakeContract, WithinHeap, WithinTurnLimit};
pub use engine::{DEFAULT_MAX_MATCHES_PER_TURN, DEFAULT_TOTAL_MATCHES, GameEngine};
pub use error::{GameError, StoreError};
pub use invariants::{
    GameOverInvariant, HeapBoundsInvariant, Invariant, InvariantSet, InvariantViolation,
    NimInvariants, ValidConfigInvariant, WinnerInvariant,
};
pub use random::{FixedRandom, RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use store::{GameStore, InMemoryGameStore};
pub use types::{
    COMPUTER_WINNER, GAME_RESET, GameId, GameState, MOVE_SUCCESSFUL, PLAYER_WINNER, PlayerType,
};
