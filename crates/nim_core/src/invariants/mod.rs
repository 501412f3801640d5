//! First-class invariants for Nim.
//!
//! Invariants are logical properties that must hold for every stored game.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        collect::<S, I3>(state, &mut violations);
        collect::<S, I4>(state, &mut violations);
        finish(violations)
    }
}

mod heap_bounds;
mod terminal_state;
mod valid_config;

pub use heap_bounds::HeapBoundsInvariant;
pub use terminal_state::{GameOverInvariant, WinnerInvariant};
pub use valid_config::ValidConfigInvariant;

/// All Nim invariants as a composable set.
pub type NimInvariants = (
    ValidConfigInvariant,
    HeapBoundsInvariant,
    GameOverInvariant,
    WinnerInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameId, GameState, PlayerType};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let state = GameState::new(13, 3);
        assert!(NimInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_final_take() {
        let mut state = GameState::new(1, 3);
        state.apply_take(PlayerType::Player, 1);
        assert!(NimInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        // Empty heap but not over, and a winner while in progress.
        let state = GameState::restore(
            GameId::from("corrupt"),
            5,
            3,
            0,
            PlayerType::Player,
            false,
            Some(PlayerType::Computer),
            None,
        );

        let violations = NimInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let state = GameState::new(4, 1);
        type TwoInvariants = (HeapBoundsInvariant, GameOverInvariant);
        assert!(TwoInvariants::check_all(&state).is_ok());
    }
}
