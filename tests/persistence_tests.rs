use std::fs;
use std::path::PathBuf;

use naval_battle::{status_report, Game, GameState, Player, PersistenceError, SaveStore};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::{json, Value};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("naval-battle-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    dir
}

/// Save `game` after passing its JSON form through `edit`, skipping every
/// engine check on the way.
fn write_edited_save(store: &SaveStore, game: &Game, edit: impl FnOnce(&mut Value)) {
    let mut value = serde_json::to_value(game).unwrap();
    edit(&mut value);
    let edited: Game = serde_json::from_value(value).unwrap();
    fs::create_dir_all(store.game_path().parent().unwrap()).unwrap();
    fs::write(store.game_path(), bincode::serialize(&edited).unwrap()).unwrap();
}

fn placed_game(seed: u64) -> Game {
    let mut game = Game::with_seed("Ada", seed).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    game.auto_place_human_fleet(&mut rng).unwrap();
    game.start_game_play().unwrap();
    game
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = scratch_dir("roundtrip");
    let store = SaveStore::new(&dir);
    assert!(!store.has_saved_game());

    let mut game = Game::with_seed("Ada", 21).unwrap();
    let mut rng = SmallRng::seed_from_u64(5);
    game.auto_place_human_fleet(&mut rng).unwrap();
    game.start_game_play().unwrap();
    store.save_game(&game).unwrap();
    assert!(store.has_saved_game());
    assert!(store.game_path().starts_with(&dir));

    let loaded = store.load_game().unwrap();
    assert_eq!(loaded.state(), GameState::PlayerTurn);
    assert_eq!(loaded.human_player(), game.human_player());
    assert_eq!(loaded.machine_player().board(), game.machine_player().board());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_save_is_reported() {
    let dir = scratch_dir("missing");
    let store = SaveStore::new(&dir);
    assert!(matches!(
        store.load_game(),
        Err(PersistenceError::NoSavedGame(path)) if path == store.game_path()
    ));
    assert_eq!(store.load_report(), None);
    // deleting nothing is fine
    store.delete_save().unwrap();
}

#[test]
fn test_delete_removes_game_and_report() {
    let dir = scratch_dir("delete");
    let store = SaveStore::new(&dir);
    let game = Game::with_seed("Ada", 22).unwrap();
    store.save_game(&game).unwrap();
    assert!(store.report_path().exists());

    store.delete_save().unwrap();
    assert!(!store.has_saved_game());
    assert!(!store.report_path().exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_corrupt_save_fails_to_decode() {
    let dir = scratch_dir("corrupt");
    let store = SaveStore::new(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(store.game_path(), [0xFFu8; 3]).unwrap();
    assert!(matches!(
        store.load_game(),
        Err(PersistenceError::Encode(_))
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_report_written_alongside_save() {
    let dir = scratch_dir("report");
    let store = SaveStore::new(&dir);
    let game = Game::with_seed("Ada", 23).unwrap();
    store.save_game(&game).unwrap();

    let report = store.load_report().unwrap();
    assert_eq!(report, status_report(&game));
    assert!(report.contains("Player nickname: Ada"));
    assert!(report.contains("Current state: ShipPlacement"));
    assert!(report.contains("Current turn: Ada"));
    assert!(report.contains("Machine ships on board: 10"));
    assert!(report.contains("Ships left to place: 10"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_report_names_winner() {
    let mut game = Game::with_seed("Ada", 24).unwrap();
    let mut rng = SmallRng::seed_from_u64(6);
    game.auto_place_human_fleet(&mut rng).unwrap();
    game.start_game_play().unwrap();
    let report = status_report(&game);
    assert!(report.contains("All player ships are placed"));

    let targets: Vec<(usize, usize)> = game
        .machine_player()
        .board()
        .ships()
        .iter()
        .flat_map(|s| s.occupied_cells().to_vec())
        .collect();
    for (r, c) in targets {
        game.process_player_shot(r, c).unwrap();
    }
    let report = status_report(&game);
    assert!(report.contains("Game over"));
    assert!(report.contains("Winner: Ada"));
    assert!(report.contains("Ships sunk by the player: 10"));
}

#[test]
fn test_load_rejects_hit_cell_without_hit_ship() {
    let dir = scratch_dir("hit-mismatch");
    let store = SaveStore::new(&dir);
    let game = placed_game(25);
    write_edited_save(&store, &game, |v| {
        for cell in v["human"]["board"]["grid"]["cells"].as_array_mut().unwrap() {
            if !cell["occupant"].is_null() {
                cell["state"] = json!("HitShipPart");
            }
        }
    });
    assert!(matches!(
        store.load_game(),
        Err(PersistenceError::Inconsistent(_))
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_load_rejects_empty_grid() {
    let dir = scratch_dir("empty-grid");
    let store = SaveStore::new(&dir);
    let game = placed_game(26);
    write_edited_save(&store, &game, |v| {
        v["machine"]["board"]["grid"] = json!({"size": 0, "cells": []});
    });
    assert!(matches!(
        store.load_game(),
        Err(PersistenceError::Inconsistent(_))
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_load_rejects_turn_mismatch() {
    let dir = scratch_dir("turn-mismatch");
    let store = SaveStore::new(&dir);
    let game = placed_game(27);
    write_edited_save(&store, &game, |v| {
        v["current"] = json!("Machine");
    });
    assert!(matches!(
        store.load_game(),
        Err(PersistenceError::Inconsistent(_))
    ));

    // the untouched game still loads
    write_edited_save(&store, &game, |_| {});
    assert_eq!(store.load_game().unwrap().state(), GameState::PlayerTurn);
    fs::remove_dir_all(&dir).unwrap();
}
