//! Database persistence layer for game states.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{GameRecord, GameRow};
pub use repository::{GameRepository, MIGRATIONS};
