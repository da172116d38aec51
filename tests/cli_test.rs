use naval_battle::cli::{coord_to_string, parse_coord, parse_orientation, render_board};
use naval_battle::{Board, Orientation, Ship, ShipKind};

#[test]
fn test_parse_coord_accepts_board_range() {
    assert_eq!(parse_coord("A1"), Ok((0, 0)));
    assert_eq!(parse_coord("j10"), Ok((9, 9)));
    assert_eq!(parse_coord("  c4 "), Ok((3, 2)));
}

#[test]
fn test_parse_coord_rejects_out_of_range() {
    assert!(parse_coord("").is_err());
    assert!(parse_coord("A").is_err());
    assert!(parse_coord("K1").is_err());
    assert!(parse_coord("A0").is_err());
    assert!(parse_coord("A11").is_err());
    assert!(parse_coord("1A").is_err());
    assert!(parse_coord("Ax").is_err());
}

#[test]
fn test_coord_to_string_matches_parser() {
    assert_eq!(coord_to_string(4, 1), "B5");
    assert_eq!(coord_to_string(9, 9), "J10");
    for r in 0..10 {
        for c in 0..10 {
            assert_eq!(parse_coord(&coord_to_string(r, c)), Ok((r, c)));
        }
    }
}

#[test]
fn test_parse_orientation() {
    assert_eq!(parse_orientation("h"), Ok(Orientation::Horizontal));
    assert_eq!(parse_orientation("Vertical"), Ok(Orientation::Vertical));
    assert!(parse_orientation("x").is_err());
    assert!(parse_orientation(" ").is_err());
}

#[test]
fn test_render_hides_unhit_ships() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Destroyer), 0, 0, Orientation::Horizontal)
        .unwrap();
    board
        .place(Ship::new(ShipKind::Frigate), 5, 5, Orientation::Horizontal)
        .unwrap();
    board.receive_shot(0, 0).unwrap();
    board.receive_shot(5, 5).unwrap();
    board.receive_shot(9, 9).unwrap();

    let hidden = render_board(&board, false);
    let revealed = render_board(&board, true);
    let hidden_rows: Vec<&str> = hidden.lines().collect();
    let revealed_rows: Vec<&str> = revealed.lines().collect();

    assert_eq!(hidden_rows[0].trim(), "A B C D E F G H I J");
    assert!(hidden_rows[1].ends_with("X . . . . . . . . ."));
    assert!(revealed_rows[1].ends_with("X S . . . . . . . ."));
    assert!(hidden_rows[6].ends_with(". . . . . # . . . ."));
    assert!(hidden_rows[10].ends_with(". . . . . . . . . o"));
    assert!(!hidden_rows[1..11].iter().any(|l| l.contains('S')));
}

#[test]
fn test_render_empty_grid_does_not_panic() {
    let board: Board = serde_json::from_value(serde_json::json!({
        "grid": {"size": 0, "cells": []},
        "ships": [],
        "sunk_count": 0,
    }))
    .unwrap();
    assert!(board.validate().is_err());
    let out = render_board(&board, true);
    assert!(out.contains("Legend"));
}
