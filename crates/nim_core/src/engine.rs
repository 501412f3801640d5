//! The Nim game engine.
//!
//! Every operation is one load, validate, compute, persist sequence against
//! the injected store. The engine itself holds no game state.

use crate::contracts::{Contract, SidesTurn, TakeContract, check_invariants};
use crate::{GameError, GameId, GameState, GameStore, PlayerType, RandomSource, Take};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Heap size restored by [`GameEngine::reset_game`].
pub const DEFAULT_TOTAL_MATCHES: u32 = 13;

/// Per-turn limit restored by [`GameEngine::reset_game`].
pub const DEFAULT_MAX_MATCHES_PER_TURN: u32 = 3;

/// Rules of misère Nim over a [`GameStore`].
#[derive(Debug, Clone)]
pub struct GameEngine {
    store: Arc<dyn GameStore>,
    random: Arc<dyn RandomSource>,
}

impl GameEngine {
    /// Creates an engine over the given store and random source.
    #[instrument(skip_all)]
    pub fn new(store: Arc<dyn GameStore>, random: Arc<dyn RandomSource>) -> Self {
        info!(?store, ?random, "Creating game engine");
        Self { store, random }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    /// Starts a new game with a full heap and the player to move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidParameters`] if either argument is zero.
    /// Nothing is stored in that case.
    #[instrument(skip(self))]
    pub fn start_game(
        &self,
        total_matches: u32,
        max_matches_per_turn: u32,
    ) -> Result<GameState, GameError> {
        info!(
            total_matches,
            max_matches_per_turn, "Creating new game"
        );

        if total_matches == 0 || max_matches_per_turn == 0 {
            warn!(
                total_matches,
                max_matches_per_turn, "Invalid parameters to start a game"
            );
            return Err(GameError::InvalidParameters {
                total_matches,
                max_matches_per_turn,
            });
        }

        let state = GameState::new(total_matches, max_matches_per_turn);
        check_invariants(&state)?;

        let saved = self.persist(state)?;
        info!(game_id = ?saved.game_id(), "Game started");
        Ok(saved)
    }

    /// Returns the stored state of a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if no game has this id.
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn get_state(&self, id: &GameId) -> Result<GameState, GameError> {
        info!("Getting game state");
        self.load(id)
    }

    /// Restores the default configuration with a full heap, keeping the id.
    ///
    /// Works from any state, including a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if no game has this id.
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn reset_game(&self, id: &GameId) -> Result<GameState, GameError> {
        info!("Resetting game");
        let mut state = self.load(id)?;

        state.reset_to(DEFAULT_TOTAL_MATCHES, DEFAULT_MAX_MATCHES_PER_TURN);
        check_invariants(&state)?;

        let saved = self.persist(state)?;
        info!("Game reset to default configuration");
        Ok(saved)
    }

    /// Takes `count` matches for the player.
    ///
    /// A finished game is returned unchanged without error.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotFound`] if no game has this id
    /// - [`GameError::InvalidMove`] if it is the computer's turn, if `count`
    ///   is outside `1..=max_matches_per_turn`, or if it exceeds the heap
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn player_move(&self, id: &GameId, count: u32) -> Result<GameState, GameError> {
        info!(count, "Starting player move");
        let state = self.load(id)?;
        if !Self::claim_turn(&state, PlayerType::Player)? {
            return Ok(state);
        }
        self.take_turn(state, Take::new(PlayerType::Player, count))
    }

    /// Takes a random number of matches for the computer.
    ///
    /// The draw is validated like a player move, so a random source that
    /// returns an out-of-range value is rejected rather than applied.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotFound`] if no game has this id
    /// - [`GameError::InvalidMove`] if it is the player's turn or the draw is
    ///   not a legal take
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn computer_move(&self, id: &GameId) -> Result<GameState, GameError> {
        info!("Starting computer move");
        let state = self.load(id)?;
        if !Self::claim_turn(&state, PlayerType::Computer)? {
            return Ok(state);
        }

        let max = *state.max_matches_per_turn();
        let drawn = self
            .random
            .generate_random_int(1, u64::from(max) + 1);
        info!(drawn, max, heap = state.matches_in_heap(), "Computer drew a move");

        self.take_turn(state, Take::new(PlayerType::Computer, drawn))
    }

    /// Checks that `side` owns the turn.
    ///
    /// Returns `false` when the game is already over and the state should be
    /// returned unchanged.
    fn claim_turn(state: &GameState, side: PlayerType) -> Result<bool, GameError> {
        SidesTurn::check(side, state).inspect_err(|e| {
            warn!(error = %e, %side, "Move out of turn");
        })?;

        if *state.is_game_over() {
            info!(winner = ?state.winner(), "Game already finished, returning final state");
            return Ok(false);
        }
        Ok(true)
    }

    /// Validates and applies a take on an open game, then persists the result.
    fn take_turn(&self, state: GameState, take: Take) -> Result<GameState, GameError> {
        TakeContract::pre(&state, &take).inspect_err(|e| {
            warn!(error = %e, %take, "Invalid move");
        })?;

        let mut next = state.clone();
        next.apply_take(take.side(), take.count());
        TakeContract::post(&state, &next).inspect_err(|e| {
            error!(error = %e, %take, "Move broke a game invariant");
        })?;

        let saved = self.persist(next)?;
        if *saved.is_game_over() {
            info!(winner = ?saved.winner(), %take, "Game over");
        } else {
            info!(
                %take,
                matches_in_heap = saved.matches_in_heap(),
                "Move successful"
            );
        }
        Ok(saved)
    }

    fn load(&self, id: &GameId) -> Result<GameState, GameError> {
        self.store
            .find_by_id(id)
            .inspect_err(|e| error!(error = %e, "Failed to load game"))?
            .ok_or_else(|| {
                warn!(game_id = %id, "Game not found");
                GameError::NotFound(id.clone())
            })
    }

    fn persist(&self, state: GameState) -> Result<GameState, GameError> {
        self.store
            .save(state)
            .inspect_err(|e| error!(error = %e, "Failed to save game"))
            .map_err(GameError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedRandom, InMemoryGameStore, MoveError, SequenceRandom};

    fn engine_with(random: Arc<dyn RandomSource>) -> GameEngine {
        GameEngine::new(Arc::new(InMemoryGameStore::new()), random)
    }

    fn id_of(state: &GameState) -> GameId {
        state.game_id().clone().expect("stored state has an id")
    }

    #[test]
    fn test_start_game_persists() {
        let engine = engine_with(Arc::new(FixedRandom::new(1)));
        let state = engine.start_game(13, 3).unwrap();
        let id = id_of(&state);
        assert!(engine.store().exists(&id).unwrap());
        assert_eq!(engine.get_state(&id).unwrap(), state);
    }

    #[test]
    fn test_invalid_parameters_store_nothing() {
        let store = InMemoryGameStore::new();
        let engine = GameEngine::new(Arc::new(store.clone()), Arc::new(FixedRandom::new(1)));
        assert!(matches!(
            engine.start_game(0, 3),
            Err(GameError::InvalidParameters { .. })
        ));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_computer_draw_range() {
        let random = Arc::new(SequenceRandom::new([2]));
        let engine = engine_with(random.clone());
        let id = id_of(&engine.start_game(13, 4).unwrap());
        engine.player_move(&id, 1).unwrap();
        engine.computer_move(&id).unwrap();
        assert_eq!(random.requests(), vec![(1, 5)]);
    }

    #[test]
    fn test_computer_does_not_draw_out_of_turn() {
        let random = Arc::new(SequenceRandom::new([1]));
        let engine = engine_with(random.clone());
        let id = id_of(&engine.start_game(13, 3).unwrap());
        assert!(matches!(
            engine.computer_move(&id),
            Err(GameError::InvalidMove(MoveError::NotYourTurn(PlayerType::Computer)))
        ));
        assert!(random.requests().is_empty());
    }

    #[test]
    fn test_computer_does_not_draw_on_finished_game() {
        let random = Arc::new(SequenceRandom::new([1]));
        let engine = engine_with(random.clone());
        let id = id_of(&engine.start_game(1, 3).unwrap());
        let finished = engine.player_move(&id, 1).unwrap();

        assert_eq!(engine.computer_move(&id).unwrap(), finished);
        assert!(random.requests().is_empty());
    }

    #[test]
    fn test_draw_range_reaches_largest_limit() {
        let random = Arc::new(SequenceRandom::new([1]));
        let engine = engine_with(random.clone());
        let id = id_of(&engine.start_game(10, u32::MAX).unwrap());
        engine.player_move(&id, 1).unwrap();
        engine.computer_move(&id).unwrap();
        assert_eq!(random.requests(), vec![(1, u64::from(u32::MAX) + 1)]);
    }
}
