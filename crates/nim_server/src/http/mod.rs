//! REST API over the game engine.

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};
pub use handlers::{Health, StartGameParams};

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use derive_getters::Getters;
use derive_new::new;
use nim_core::GameEngine;
use tracing::{info, instrument};

use crate::ServerConfig;

/// Shared state handed to every handler.
#[derive(Debug, Clone, new, Getters)]
pub struct AppState {
    engine: GameEngine,
}

/// Builds the router with all game routes.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/start-game", post(handlers::start_game))
        .route("/state/{id}", get(handlers::get_state))
        .route("/reset/{id}", put(handlers::reset_game))
        .route("/player-move/{id}/{player_moves}", post(handlers::player_move))
        .route("/computer-move/{id}", post(handlers::computer_move))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    info!(method = %method, uri = %uri, "Incoming HTTP request");

    let response = next.run(req).await;
    info!(status = ?response.status(), method = %method, uri = %uri, "Response sent");
    response
}

/// Binds the configured address and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip_all, fields(address = %config.bind_address()))]
pub async fn serve(config: &ServerConfig, engine: GameEngine) -> anyhow::Result<()> {
    let app = create_app(AppState::new(engine));
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Nim server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
