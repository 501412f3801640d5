//! Heap bounds invariant: the heap never exceeds the starting total.

use super::Invariant;
use crate::GameState;

/// Invariant: `matches_in_heap <= total_matches`.
///
/// The lower bound is carried by the unsigned type.
pub struct HeapBoundsInvariant;

impl Invariant<GameState> for HeapBoundsInvariant {
    fn holds(state: &GameState) -> bool {
        state.matches_in_heap() <= state.total_matches()
    }

    fn description() -> &'static str {
        "Heap holds no more matches than the game started with"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameId, PlayerType};

    #[test]
    fn test_full_heap_holds() {
        assert!(HeapBoundsInvariant::holds(&GameState::new(13, 3)));
    }

    #[test]
    fn test_overfull_heap_violates() {
        let state = GameState::restore(
            GameId::from("g"),
            5,
            3,
            6,
            PlayerType::Player,
            false,
            None,
            None,
        );
        assert!(!HeapBoundsInvariant::holds(&state));
    }
}
