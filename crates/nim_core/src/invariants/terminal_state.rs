//! Terminal state invariants: game over, empty heap and winner move together.

use super::Invariant;
use crate::GameState;

/// Invariant: the game is over exactly when the heap is empty.
pub struct GameOverInvariant;

impl Invariant<GameState> for GameOverInvariant {
    fn holds(state: &GameState) -> bool {
        *state.is_game_over() == (*state.matches_in_heap() == 0)
    }

    fn description() -> &'static str {
        "Game is over exactly when the heap is empty"
    }
}

/// Invariant: a winner is recorded exactly when the game is over.
pub struct WinnerInvariant;

impl Invariant<GameState> for WinnerInvariant {
    fn holds(state: &GameState) -> bool {
        state.winner().is_some() == *state.is_game_over()
    }

    fn description() -> &'static str {
        "Winner is set exactly when the game is over"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameId, PlayerType};

    fn state(heap: u32, over: bool, winner: Option<PlayerType>) -> GameState {
        GameState::restore(
            GameId::from("g"),
            5,
            3,
            heap,
            PlayerType::Computer,
            over,
            winner,
            None,
        )
    }

    #[test]
    fn test_finished_game_holds() {
        let finished = state(0, true, Some(PlayerType::Player));
        assert!(GameOverInvariant::holds(&finished));
        assert!(WinnerInvariant::holds(&finished));
    }

    #[test]
    fn test_over_with_matches_left_violates() {
        assert!(!GameOverInvariant::holds(&state(2, true, Some(PlayerType::Player))));
    }

    #[test]
    fn test_over_without_winner_violates() {
        assert!(!WinnerInvariant::holds(&state(0, true, None)));
    }
}
