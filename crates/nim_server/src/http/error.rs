//! Mapping of engine failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nim_core::{GameError, GameState};
use serde::Serialize;
use tracing::{error, warn};

/// Error body for failures that carry no game state.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable error text.
    pub message: String,
}

/// A failed request.
///
/// Rejected moves carry the current game state, whose `message` is replaced
/// by the error text before it is returned.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    state: Option<GameState>,
}

impl ApiError {
    /// Creates an error with the given status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            state: None,
        }
    }

    /// Internal failure not tied to a game rule.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Maps an error from a computer move.
    ///
    /// An illegal computer move is a server fault, not bad input.
    pub fn from_computer_move(err: GameError) -> Self {
        match err {
            GameError::InvalidMove(e) => Self::internal(e.to_string()),
            other => Self::from(other),
        }
    }

    /// Attaches the game state to return with the error.
    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        let status = match &err {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "Request failed");
        } else {
            warn!(status = %self.status, message = %self.message, "Request rejected");
        }

        match self.state {
            Some(state) => (self.status, Json(state.with_message(self.message))).into_response(),
            None => (
                self.status,
                Json(ErrorBody {
                    message: self.message,
                }),
            )
                .into_response(),
        }
    }
}
