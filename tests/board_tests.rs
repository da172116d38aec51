use naval_battle::{Board, BoardError, CellState, Orientation, Ship, ShipKind, ShotResult};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_manual_place_and_shoot_to_sink() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Carrier), 0, 0, Orientation::Horizontal)
        .unwrap();

    for c in 0..3 {
        assert_eq!(board.receive_shot(0, c).unwrap(), ShotResult::Touch);
        assert_eq!(board.cell(0, c).unwrap().state(), CellState::HitShipPart);
    }
    assert_eq!(board.sunk_count(), 0);
    // final hit should sink
    assert_eq!(board.receive_shot(0, 3).unwrap(), ShotResult::Sunk);
    assert_eq!(board.sunk_count(), 1);
    assert!(board.ships()[0].is_sunk());
    for c in 0..4 {
        assert_eq!(board.cell(0, c).unwrap().state(), CellState::SunkShipPart);
    }

    // repeated shot triggers error
    assert_eq!(
        board.receive_shot(0, 3).unwrap_err(),
        BoardError::CellAlreadyShot { row: 0, col: 3 }
    );
}

#[test]
fn test_water_shot_marks_cell() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Frigate), 5, 5, Orientation::Vertical)
        .unwrap();
    assert_eq!(board.receive_shot(4, 4).unwrap(), ShotResult::Water);
    assert_eq!(board.cell(4, 4).unwrap().state(), CellState::Water);
    assert!(board.was_shot_at(4, 4));
    assert!(!board.has_ship_at(4, 4));
    assert_eq!(
        board.receive_shot(4, 4).unwrap_err(),
        BoardError::CellAlreadyShot { row: 4, col: 4 }
    );
}

#[test]
fn test_out_of_bounds_shot_is_invalid_and_harmless() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Destroyer), 9, 8, Orientation::Horizontal)
        .unwrap();
    let before = board.clone();
    assert_eq!(board.receive_shot(10, 0).unwrap(), ShotResult::InvalidShot);
    assert_eq!(board.receive_shot(0, 10).unwrap(), ShotResult::InvalidShot);
    assert_eq!(board, before);
}

#[test]
fn test_carrier_at_column_seven_does_not_fit() {
    let mut board = Board::new();
    let carrier = Ship::new(ShipKind::Carrier);
    assert!(!board.can_place(&carrier, 0, 7, Orientation::Horizontal));
    assert!(board.can_place(&carrier, 0, 6, Orientation::Horizontal));
    assert!(!board.can_place(&carrier, 7, 0, Orientation::Vertical));
    assert_eq!(
        board
            .place(carrier, 0, 7, Orientation::Horizontal)
            .unwrap_err(),
        BoardError::InvalidPlacement {
            kind: ShipKind::Carrier,
            row: 0,
            col: 7,
            orientation: Orientation::Horizontal,
        }
    );
    assert!(board.ships().is_empty());
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_overlap_rejected_but_touching_allowed() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Submarine), 2, 2, Orientation::Horizontal)
        .unwrap();
    // crosses (2, 3)
    assert!(!board.can_place(&Ship::new(ShipKind::Destroyer), 1, 3, Orientation::Vertical));
    assert!(matches!(
        board.place(Ship::new(ShipKind::Destroyer), 1, 3, Orientation::Vertical),
        Err(BoardError::InvalidPlacement { .. })
    ));
    // directly adjacent on every side
    board
        .place(Ship::new(ShipKind::Submarine), 3, 2, Orientation::Horizontal)
        .unwrap();
    board
        .place(Ship::new(ShipKind::Frigate), 2, 5, Orientation::Horizontal)
        .unwrap();
    board
        .place(Ship::new(ShipKind::Frigate), 1, 1, Orientation::Horizontal)
        .unwrap();
    assert_eq!(board.ships().len(), 4);
    assert_eq!(board.occupied_count(), 8);
}

#[test]
fn test_ship_cells_follow_placement_order() {
    let mut board = Board::new();
    let id = board
        .place(Ship::new(ShipKind::Submarine), 4, 6, Orientation::Vertical)
        .unwrap();
    let ship = board.ship(id).unwrap();
    assert_eq!(ship.occupied_cells(), &[(4, 6), (5, 6), (6, 6)]);
    assert_eq!(ship.orientation(), Some(Orientation::Vertical));
    for &(r, c) in ship.occupied_cells() {
        assert_eq!(board.cell(r, c).unwrap().occupant(), Some(id));
        assert_eq!(board.cell(r, c).unwrap().state(), CellState::ShipPart);
    }
}

#[test]
fn test_placed_ship_cannot_be_placed_again() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Frigate), 0, 0, Orientation::Horizontal)
        .unwrap();
    let placed = board.ships()[0].clone();
    let mut other = Board::new();
    assert_eq!(
        other
            .place(placed, 5, 5, Orientation::Horizontal)
            .unwrap_err(),
        BoardError::ShipAlreadyPlaced(ShipKind::Frigate)
    );
}

#[test]
fn test_all_sunk_needs_ships() {
    let mut board = Board::new();
    assert!(!board.all_sunk());
    board
        .place(Ship::new(ShipKind::Frigate), 0, 0, Orientation::Horizontal)
        .unwrap();
    board
        .place(Ship::new(ShipKind::Destroyer), 5, 5, Orientation::Vertical)
        .unwrap();
    assert!(!board.all_sunk());
    board.receive_shot(0, 0).unwrap();
    assert!(!board.all_sunk());
    board.receive_shot(5, 5).unwrap();
    assert!(!board.all_sunk());
    assert_eq!(board.receive_shot(6, 5).unwrap(), ShotResult::Sunk);
    assert!(board.all_sunk());
}

#[test]
fn test_reset_clears_everything() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Frigate), 0, 0, Orientation::Horizontal)
        .unwrap();
    board.receive_shot(0, 0).unwrap();
    board.receive_shot(1, 1).unwrap();
    board.reset();
    assert_eq!(board, Board::new());
    assert!(board.ships().is_empty());
    assert_eq!(board.sunk_count(), 0);
    assert!(!board.was_shot_at(1, 1));
    assert_eq!(board.unshot_cells().count(), 100);
}

#[test]
fn test_random_placement_fits() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    let (r, c, orient) = board.random_placement(&mut rng, 4).unwrap();
    board
        .place(Ship::new(ShipKind::Carrier), r, c, orient)
        .unwrap();
    assert_eq!(board.occupied_count(), 4);
    assert!(board.random_placement(&mut rng, 11).is_none());
    assert!(board.random_placement(&mut rng, 0).is_none());
}

#[test]
fn test_random_placement_gives_up_on_full_board() {
    let mut board = Board::new();
    for r in 0..10 {
        for c in 0..10 {
            board
                .place(Ship::new(ShipKind::Frigate), r, c, Orientation::Horizontal)
                .unwrap();
        }
    }
    assert_eq!(board.occupied_count(), 100);
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(board.random_placement(&mut rng, 1), None);
    assert_eq!(board.random_placement(&mut rng, 4), None);
}

#[test]
fn test_validate_accepts_played_board() {
    let mut board = Board::new();
    assert_eq!(board.validate(), Ok(()));
    board
        .place(Ship::new(ShipKind::Submarine), 1, 1, Orientation::Vertical)
        .unwrap();
    board
        .place(Ship::new(ShipKind::Frigate), 8, 8, Orientation::Horizontal)
        .unwrap();
    board.receive_shot(1, 1).unwrap();
    board.receive_shot(0, 0).unwrap();
    board.receive_shot(8, 8).unwrap();
    assert_eq!(board.validate(), Ok(()));
}
