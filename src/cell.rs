//! Board cells and the row-major grid that owns them.

use serde::{Deserialize, Serialize};

use crate::ship::ShipId;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    ShipPart,
    Water,
    HitShipPart,
    SunkShipPart,
}

impl CellState {
    /// `true` once the cell has received a shot.
    pub fn is_shot(self) -> bool {
        matches!(
            self,
            CellState::Water | CellState::HitShipPart | CellState::SunkShipPart
        )
    }
}

/// A single addressable position. `occupant` is set exactly when the state
/// is one of the ship states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: usize,
    col: usize,
    state: CellState,
    occupant: Option<ShipId>,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            state: CellState::Empty,
            occupant: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// Ship occupying this cell, if any.
    pub fn occupant(&self) -> Option<ShipId> {
        self.occupant
    }

    pub fn is_shot(&self) -> bool {
        self.state.is_shot()
    }

    pub(crate) fn set_occupant(&mut self, ship: ShipId) {
        self.occupant = Some(ship);
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

/// Square grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a `size`×`size` grid of empty cells.
    pub fn new(size: usize) -> Self {
        let cells = (0..size * size)
            .map(|i| Cell::new(i / size, i % size))
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.contains(row, col) {
            self.cells.get(row * self.size + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if self.contains(row, col) {
            self.cells.get_mut(row * self.size + col)
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }
}
