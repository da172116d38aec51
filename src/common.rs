//! Common types for the engine: shot results, errors and placement reports.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::GameState;
use crate::player::Side;
use crate::ship::{Orientation, ShipKind};

/// Outcome of a shot fired at a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotResult {
    /// The shot landed in empty water.
    Water,
    /// The shot hit a ship that is still afloat.
    Touch,
    /// The shot sank a ship.
    Sunk,
    /// The machine targeted a cell that had already been shot.
    AlreadyShot,
    /// The coordinates are off the board, or no target was left.
    InvalidShot,
}

impl ShotResult {
    /// `true` for results that keep the turn with the shooter.
    pub fn is_hit(self) -> bool {
        matches!(self, ShotResult::Touch | ShotResult::Sunk)
    }
}

/// Errors returned by `Board` and `Ship` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The footprint leaves the grid or overlaps another ship.
    #[error("cannot place {kind} at ({row}, {col}) {orientation}")]
    InvalidPlacement {
        kind: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    },
    /// The target cell was shot before.
    #[error("cell ({row}, {col}) was already shot")]
    CellAlreadyShot { row: usize, col: usize },
    /// Attempted to place a ship that is already on a board.
    #[error("{0} is already placed")]
    ShipAlreadyPlaced(ShipKind),
    /// The cell list handed to a ship does not match its size.
    #[error("{kind} needs {expected} cells, got {actual}")]
    FootprintMismatch {
        kind: ShipKind,
        expected: usize,
        actual: usize,
    },
}

/// Errors returned by `Game` and `Player` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    /// The operation is not legal in the current state or turn.
    #[error("{operation} is not allowed in state {state:?} on the {turn:?} turn")]
    IllegalState {
        operation: &'static str,
        state: GameState,
        turn: Side,
    },
    /// Player names must contain at least one non-whitespace character.
    #[error("player name must not be empty")]
    InvalidName,
    /// Every ship of this kind has already been placed.
    #[error("no {0} left to place in the fleet")]
    ShipNotInFleet(ShipKind),
    /// Human shots come from the interface, never from the player itself.
    #[error("human targets are supplied by the interface")]
    ExternalTargeting,
}

/// Result of an automatic fleet placement. Ships listed in `unplaced`
/// could not be fitted after every attempt was spent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub unplaced: Vec<ShipKind>,
}

impl PlacementReport {
    /// `true` when every ship found a spot.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}
