//! Route handlers.
//!
//! Engine calls are synchronous and may hit SQLite, so each one runs on the
//! blocking pool.

use axum::Json;
use axum::extract::{Path, Query, State};
use nim_core::{GameError, GameId, GameState};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::http::{ApiError, AppState};

/// Query parameters for `POST /start-game`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameParams {
    /// Initial heap size.
    pub total_matches: u32,
    /// Most matches one side may take per turn.
    pub max_matches_per_turn: u32,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    /// Always `"ok"` while the server answers.
    pub status: &'static str,
}

/// Runs an engine call on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<Result<T, GameError>, ApiError>
where
    F: FnOnce() -> Result<T, GameError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("Engine task failed: {}", e)))
}

/// Attaches the stored state of `id` to a rejected move.
///
/// If the state cannot be read the error goes out without it.
async fn with_current_state(app: &AppState, id: GameId, err: ApiError) -> ApiError {
    let engine = app.engine().clone();
    match blocking(move || engine.get_state(&id)).await {
        Ok(Ok(state)) => err.with_state(state),
        _ => err,
    }
}

/// `POST /start-game`
#[instrument(skip(app))]
pub async fn start_game(
    State(app): State<AppState>,
    Query(params): Query<StartGameParams>,
) -> Result<Json<GameState>, ApiError> {
    let engine = app.engine().clone();
    let state = blocking(move || {
        engine.start_game(params.total_matches, params.max_matches_per_turn)
    })
    .await??;

    debug!(game_id = ?state.game_id(), "Game started");
    Ok(Json(state))
}

/// `GET /state/{id}`
#[instrument(skip(app))]
pub async fn get_state(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameState>, ApiError> {
    let engine = app.engine().clone();
    let id = GameId::from(id);
    let state = blocking(move || engine.get_state(&id)).await??;
    Ok(Json(state))
}

/// `PUT /reset/{id}`
#[instrument(skip(app))]
pub async fn reset_game(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameState>, ApiError> {
    let engine = app.engine().clone();
    let id = GameId::from(id);
    let state = blocking(move || engine.reset_game(&id)).await??;
    Ok(Json(state))
}

/// `POST /player-move/{id}/{playerMoves}`
#[instrument(skip(app))]
pub async fn player_move(
    State(app): State<AppState>,
    Path((id, player_moves)): Path<(String, u32)>,
) -> Result<Json<GameState>, ApiError> {
    let engine = app.engine().clone();
    let id = GameId::from(id);
    let target = id.clone();

    match blocking(move || engine.player_move(&target, player_moves)).await? {
        Ok(state) => Ok(Json(state)),
        Err(err @ GameError::InvalidMove(_)) => {
            Err(with_current_state(&app, id, ApiError::from(err)).await)
        }
        Err(err) => Err(err.into()),
    }
}

/// `POST /computer-move/{id}`
#[instrument(skip(app))]
pub async fn computer_move(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameState>, ApiError> {
    let engine = app.engine().clone();
    let id = GameId::from(id);
    let target = id.clone();

    match blocking(move || engine.computer_move(&target)).await? {
        Ok(state) => Ok(Json(state)),
        Err(err @ GameError::InvalidMove(_)) => {
            Err(with_current_state(&app, id, ApiError::from_computer_move(err)).await)
        }
        Err(err) => Err(ApiError::from_computer_move(err)),
    }
}

/// `GET /health`
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
