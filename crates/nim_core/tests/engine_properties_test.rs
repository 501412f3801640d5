//! Property tests for the turn state machine.

use std::sync::Arc;

use nim_core::{GameEngine, GameError, InMemoryGameStore, PlayerType, SeededRandom};
use proptest::prelude::*;

proptest! {
    #[test]
    fn start_game_yields_full_heap(total in 1u32..500, max in 1u32..50) {
        let engine = GameEngine::new(
            Arc::new(InMemoryGameStore::new()),
            Arc::new(SeededRandom::new(0)),
        );
        let state = engine.start_game(total, max).unwrap();
        prop_assert_eq!(*state.matches_in_heap(), total);
        prop_assert_eq!(*state.current_player(), PlayerType::Player);
        prop_assert!(!*state.is_game_over());
    }

    #[test]
    fn alternating_play_keeps_invariants(
        total in 1u32..60,
        max in 1u32..8,
        seed in any::<u64>(),
        player_picks in proptest::collection::vec(1u32..8, 1..80),
    ) {
        let engine = GameEngine::new(
            Arc::new(InMemoryGameStore::new()),
            Arc::new(SeededRandom::new(seed)),
        );
        let mut state = engine.start_game(total, max).unwrap();
        let id = state.game_id().clone().unwrap();
        let mut picks = player_picks.into_iter().cycle();

        while !*state.is_game_over() {
            let before = state.clone();
            let mover = *before.current_player();

            let result = match mover {
                PlayerType::Player => {
                    let pick = picks.next().unwrap_or(1);
                    let count = pick.min(max).min(*before.matches_in_heap());
                    engine.player_move(&id, count)
                }
                PlayerType::Computer => engine.computer_move(&id),
            };

            let next = match result {
                Ok(next) => next,
                // The computer may draw more than a short heap holds.
                Err(GameError::InvalidMove(_)) if mover == PlayerType::Computer => {
                    prop_assert!(*before.matches_in_heap() < max);
                    prop_assert_eq!(engine.get_state(&id).unwrap(), before);
                    break;
                }
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            };

            prop_assert!(next.matches_in_heap() < before.matches_in_heap());
            prop_assert!(next.matches_in_heap() <= next.total_matches());
            prop_assert_eq!(*next.current_player(), mover.opponent());
            prop_assert_eq!(*next.is_game_over(), *next.matches_in_heap() == 0);
            prop_assert_eq!(next.winner().is_some(), *next.is_game_over());
            if *next.is_game_over() {
                prop_assert_eq!(*next.winner(), Some(mover.opponent()));
            }
            state = next;
        }
    }
}
