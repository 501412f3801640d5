//! Contract-based validation for Nim takes.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::invariants::{InvariantSet, NimInvariants};
use crate::{GameError, GameState, MoveError, PlayerType, Take};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Take Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the mover owns the turn.
pub struct SidesTurn;

impl SidesTurn {
    /// Rejects a move by the side that is not to move.
    #[instrument(skip(state))]
    pub fn check(side: PlayerType, state: &GameState) -> Result<(), MoveError> {
        if state.is_turn_of(side) {
            Ok(())
        } else {
            Err(MoveError::NotYourTurn(side))
        }
    }
}

/// Precondition: the count lies in `1..=max_matches_per_turn`.
pub struct WithinTurnLimit;

impl WithinTurnLimit {
    /// Rejects a take of zero or of more than the per-turn limit.
    #[instrument(skip(state))]
    pub fn check(take: &Take, state: &GameState) -> Result<(), MoveError> {
        let max = *state.max_matches_per_turn();
        if take.count() < 1 || take.count() > max {
            Err(MoveError::OutsideTurnLimit {
                count: take.count(),
                max,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the heap holds at least as many matches as are taken.
pub struct WithinHeap;

impl WithinHeap {
    /// Rejects a take larger than the remaining heap.
    #[instrument(skip(state))]
    pub fn check(take: &Take, state: &GameState) -> Result<(), MoveError> {
        let heap = *state.matches_in_heap();
        if take.count() > heap {
            Err(MoveError::ExceedsHeap {
                count: take.count(),
                heap,
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition on the count: within the turn limit, then within the heap.
///
/// Turn ownership is checked separately because a finished game
/// short-circuits between the two.
pub struct LegalTake;

impl LegalTake {
    /// Validates the count of a take.
    #[instrument(skip(state))]
    pub fn check(take: &Take, state: &GameState) -> Result<(), MoveError> {
        WithinTurnLimit::check(take, state)?;
        WithinHeap::check(take, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Take Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for take actions.
///
/// Preconditions:
/// - Count within the per-turn limit
/// - Count within the heap
///
/// Postconditions:
/// - Heap strictly shrank
/// - Turn passed to the other side
/// - All state invariants hold
pub struct TakeContract;

impl Contract<GameState, Take> for TakeContract {
    fn pre(state: &GameState, action: &Take) -> Result<(), GameError> {
        LegalTake::check(action, state).map_err(GameError::from)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), GameError> {
        if after.matches_in_heap() >= before.matches_in_heap() {
            warn!(
                before = before.matches_in_heap(),
                after = after.matches_in_heap(),
                "Heap did not shrink"
            );
            return Err(GameError::InvariantViolation(
                "Postcondition failed: heap did not shrink".to_string(),
            ));
        }

        if after.current_player() == before.current_player() {
            warn!(side = %after.current_player(), "Turn did not pass");
            return Err(GameError::InvariantViolation(
                "Postcondition failed: turn did not pass".to_string(),
            ));
        }

        check_invariants(after)
    }
}

/// Checks the full invariant set, joining any violations into one error.
#[instrument(skip(state))]
pub(crate) fn check_invariants(state: &GameState) -> Result<(), GameError> {
    NimInvariants::check_all(state).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Invariant check failed");
        GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}
