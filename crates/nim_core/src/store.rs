//! Key-value storage for game states.

use crate::{GameId, GameState, StoreError};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

/// Durable holder of game states, keyed by [`GameId`].
///
/// Implementations must round-trip every field unchanged.
pub trait GameStore: Send + Sync + Debug {
    /// Inserts `state` under a fresh id if it has none, else overwrites it.
    ///
    /// Returns the stored state, which always carries an id.
    fn save(&self, state: GameState) -> Result<GameState, StoreError>;

    /// Loads the state stored under `id`.
    fn find_by_id(&self, id: &GameId) -> Result<Option<GameState>, StoreError>;

    /// Checks whether a state is stored under `id`.
    fn exists(&self, id: &GameId) -> Result<bool, StoreError> {
        Ok(self.find_by_id(id)?.is_some())
    }
}

/// Process-local store backed by a shared map.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameStore {
    games: Arc<Mutex<HashMap<GameId, GameState>>>,
}

impl InMemoryGameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        debug!("Creating in-memory game store");
        Self::default()
    }

    /// Number of stored games.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the lock was poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    /// True when no game is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the lock was poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<GameId, GameState>>, StoreError> {
        self.games
            .lock()
            .map_err(|_| StoreError::new("In-memory game store lock poisoned"))
    }
}

impl GameStore for InMemoryGameStore {
    #[instrument(skip(self, state), fields(game_id = ?state.game_id()))]
    fn save(&self, state: GameState) -> Result<GameState, StoreError> {
        let id = state.game_id().clone().unwrap_or_else(GameId::generate);
        let state = state.with_game_id(id.clone());
        self.lock()?.insert(id.clone(), state.clone());
        debug!(game_id = %id, "Game saved");
        Ok(state)
    }

    #[instrument(skip(self))]
    fn find_by_id(&self, id: &GameId) -> Result<Option<GameState>, StoreError> {
        let state = self.lock()?.get(id).cloned();
        if state.is_none() {
            debug!(game_id = %id, "Game not found");
        }
        Ok(state)
    }

    #[instrument(skip(self))]
    fn exists(&self, id: &GameId) -> Result<bool, StoreError> {
        Ok(self.lock()?.contains_key(id))
    }
}
