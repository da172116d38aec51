//! Ship kinds and placement/damage tracking.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::{CellState, Grid};
use crate::common::BoardError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `offset` steps along this orientation from `(row, col)`.
    pub fn step(self, row: usize, col: usize, offset: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + offset),
            Orientation::Vertical => (row + offset, col),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    Carrier,
    Submarine,
    Destroyer,
    Frigate,
}

impl ShipKind {
    /// Number of cells the ship occupies.
    pub const fn size(self) -> usize {
        match self {
            ShipKind::Carrier => 4,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
            ShipKind::Frigate => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Aircraft Carrier",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Frigate => "Frigate",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of a ship in its board's ship list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipId(pub usize);

/// A fleet unit. Starts unplaced, is placed once, then takes hits until sunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    kind: ShipKind,
    hit_count: usize,
    sunk: bool,
    orientation: Option<Orientation>,
    occupied: Vec<(usize, usize)>,
}

impl Ship {
    /// Create an unplaced ship of `kind`.
    pub fn new(kind: ShipKind) -> Self {
        Self {
            kind,
            hit_count: 0,
            sunk: false,
            orientation: None,
            occupied: Vec::with_capacity(kind.size()),
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Orientation, known once the ship is placed.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Occupied cells in placement order.
    pub fn occupied_cells(&self) -> &[(usize, usize)] {
        &self.occupied
    }

    pub fn is_placed(&self) -> bool {
        !self.occupied.is_empty()
    }

    /// Occupy `cells` on `grid` as ship `id`, marking each one as a ship part.
    ///
    /// The caller has already checked that every cell is on the grid and free.
    pub fn place(
        &mut self,
        id: ShipId,
        orientation: Orientation,
        cells: Vec<(usize, usize)>,
        grid: &mut Grid,
    ) -> Result<(), BoardError> {
        if self.is_placed() {
            return Err(BoardError::ShipAlreadyPlaced(self.kind));
        }
        if cells.len() != self.size() {
            return Err(BoardError::FootprintMismatch {
                kind: self.kind,
                expected: self.size(),
                actual: cells.len(),
            });
        }
        for &(row, col) in &cells {
            if let Some(cell) = grid.get_mut(row, col) {
                cell.set_occupant(id);
                cell.set_state(CellState::ShipPart);
            }
        }
        self.orientation = Some(orientation);
        self.occupied = cells;
        Ok(())
    }

    /// Record one hit. Returns `true` only for the hit that sinks the ship,
    /// at which point every occupied cell on `grid` is marked sunk.
    pub fn register_hit(&mut self, grid: &mut Grid) -> bool {
        if self.sunk {
            return false;
        }
        self.hit_count += 1;
        if self.hit_count < self.size() {
            return false;
        }
        self.sunk = true;
        for &(row, col) in &self.occupied {
            if let Some(cell) = grid.get_mut(row, col) {
                cell.set_state(CellState::SunkShipPart);
            }
        }
        true
    }

    /// Restore full health without moving the ship.
    pub fn reset(&mut self) {
        self.hit_count = 0;
        self.sunk = false;
    }
}
