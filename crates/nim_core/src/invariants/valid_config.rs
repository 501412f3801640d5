//! Configuration invariant: both game parameters are positive.

use super::Invariant;
use crate::GameState;

/// Invariant: `total_matches >= 1` and `max_matches_per_turn >= 1`.
pub struct ValidConfigInvariant;

impl Invariant<GameState> for ValidConfigInvariant {
    fn holds(state: &GameState) -> bool {
        *state.total_matches() >= 1 && *state.max_matches_per_turn() >= 1
    }

    fn description() -> &'static str {
        "Total matches and matches per turn are both at least one"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_config_holds() {
        assert!(ValidConfigInvariant::holds(&GameState::new(1, 1)));
    }

    #[test]
    fn test_zero_limit_violates() {
        assert!(!ValidConfigInvariant::holds(&GameState::new(13, 0)));
    }
}
