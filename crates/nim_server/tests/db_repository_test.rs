//! Tests for database repository operations.

use std::sync::Arc;

use tempfile::NamedTempFile;

use nim_core::{
    FixedRandom, GameEngine, GameError, GameId, GameState, GameStore, MOVE_SUCCESSFUL,
    PLAYER_WINNER, PlayerType,
};
use nim_server::GameRepository;

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

#[test]
fn test_migrations_are_idempotent() {
    let (_db, repo) = setup_test_db();
    let applied = repo.run_migrations().expect("Second run failed");
    assert_eq!(applied, 0);
}

#[test]
fn test_empty_path_rejected() {
    assert!(GameRepository::new("  ".to_string()).is_err());
}

#[test]
fn test_save_assigns_id() {
    let (_db, repo) = setup_test_db();
    let saved = repo.save_game(GameState::new(13, 3)).expect("Save failed");

    let id = saved.game_id().clone().expect("Saved game has no id");
    assert!(!id.as_str().is_empty());
    assert_eq!(*saved.matches_in_heap(), 13);
    assert_eq!(repo.count_games().expect("Count failed"), 1);
}

#[test]
fn test_save_then_find_round_trip() {
    let (_db, repo) = setup_test_db();
    let state = GameState::restore(
        GameId::from("g-1"),
        13,
        3,
        0,
        PlayerType::Computer,
        true,
        Some(PlayerType::Player),
        Some(PLAYER_WINNER.to_string()),
    );

    repo.save_game(state.clone()).expect("Save failed");
    let found = repo
        .find_game(&GameId::from("g-1"))
        .expect("Query failed")
        .expect("Game missing");
    assert_eq!(found, state);
}

#[test]
fn test_save_overwrites_existing() {
    let (_db, repo) = setup_test_db();
    let id = GameId::from("g-2");
    let first = GameState::restore(
        id.clone(),
        13,
        3,
        13,
        PlayerType::Player,
        false,
        None,
        None,
    );
    repo.save_game(first).expect("First save failed");

    let second = GameState::restore(
        id.clone(),
        13,
        3,
        10,
        PlayerType::Computer,
        false,
        None,
        Some(MOVE_SUCCESSFUL.to_string()),
    );
    repo.save_game(second.clone()).expect("Second save failed");

    assert_eq!(repo.count_games().expect("Count failed"), 1);
    let found = repo.find_game(&id).expect("Query failed");
    assert_eq!(found, Some(second));
}

#[test]
fn test_find_missing_returns_none() {
    let (_db, repo) = setup_test_db();
    let found = repo
        .find_game(&GameId::from("no-such-game"))
        .expect("Query failed");
    assert!(found.is_none());
}

#[test]
fn test_exists() {
    let (_db, repo) = setup_test_db();
    let saved = repo.save_game(GameState::new(5, 2)).expect("Save failed");
    let id = saved.game_id().clone().expect("Saved game has no id");

    assert!(repo.exists(&id).expect("Query failed"));
    assert!(!repo.exists(&GameId::from("other")).expect("Query failed"));
}

#[test]
fn test_engine_over_repository() {
    let (_db, repo) = setup_test_db();
    let engine = GameEngine::new(Arc::new(repo.clone()), Arc::new(FixedRandom::new(2)));

    let game = engine.start_game(7, 3).expect("Start failed");
    let id = game.game_id().clone().expect("Started game has no id");

    engine.player_move(&id, 3).expect("Player move failed");
    let game = engine.computer_move(&id).expect("Computer move failed");
    assert_eq!(*game.matches_in_heap(), 2);
    assert_eq!(*game.current_player(), PlayerType::Player);

    let stored = repo
        .find_game(&id)
        .expect("Query failed")
        .expect("Game missing");
    assert_eq!(stored, game);

    let reset = engine.reset_game(&id).expect("Reset failed");
    assert_eq!(*reset.matches_in_heap(), 13);
    assert_eq!(reset.game_id().as_ref(), Some(&id));
}

#[test]
fn test_engine_missing_game_is_not_found() {
    let (_db, repo) = setup_test_db();
    let engine = GameEngine::new(Arc::new(repo), Arc::new(FixedRandom::new(1)));

    let result = engine.get_state(&GameId::from("ghost"));
    assert!(matches!(result, Err(GameError::NotFound(_))));
}

#[test]
fn test_engine_stores_heap_above_i32() {
    let (_db, repo) = setup_test_db();
    let engine = GameEngine::new(Arc::new(repo.clone()), Arc::new(FixedRandom::new(1)));

    let game = engine
        .start_game(3_000_000_000, 3)
        .expect("Start failed");
    let id = game.game_id().clone().expect("Started game has no id");
    assert_eq!(*game.matches_in_heap(), 3_000_000_000);

    let game = engine.player_move(&id, 3).expect("Player move failed");
    let stored = repo
        .find_game(&id)
        .expect("Query failed")
        .expect("Game missing");
    assert_eq!(*stored.matches_in_heap(), 2_999_999_997);
    assert_eq!(stored, game);
}

