//! Game board: the cell grid plus the ships placed on it.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellState, Grid};
use crate::common::{BoardError, ShotResult};
use crate::config::{BOARD_SIZE, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, Ship, ShipId};

/// Main board state: grid, placed ships and how many of them are sunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    ships: Vec<Ship>,
    sunk_count: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships placed, nothing shot).
    pub fn new() -> Self {
        Board {
            grid: Grid::new(BOARD_SIZE),
            ships: Vec::new(),
            sunk_count: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.get(row, col)
    }

    /// Cells grouped by row, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.rows()
    }

    /// Placed ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    pub fn sunk_count(&self) -> usize {
        self.sunk_count
    }

    /// Number of cells covered by ships.
    pub fn occupied_count(&self) -> usize {
        self.grid.cells().filter(|c| c.occupant().is_some()).count()
    }

    /// Cells of the footprint starting at `(row, col)`, or `None` if it
    /// leaves the grid.
    fn footprint(
        &self,
        size: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Option<Vec<(usize, usize)>> {
        if !self.grid.contains(row, col) {
            return None;
        }
        let (end_row, end_col) = orientation.step(row, col, size.checked_sub(1)?);
        if !self.grid.contains(end_row, end_col) {
            return None;
        }
        Some((0..size).map(|i| orientation.step(row, col, i)).collect())
    }

    /// `true` when `ship` fits at `(row, col)` without leaving the grid or
    /// overlapping another ship. Touching ships are allowed.
    pub fn can_place(&self, ship: &Ship, row: usize, col: usize, orientation: Orientation) -> bool {
        self.can_place_size(ship.size(), row, col, orientation)
    }

    fn can_place_size(&self, size: usize, row: usize, col: usize, orientation: Orientation) -> bool {
        match self.footprint(size, row, col, orientation) {
            Some(cells) => cells.iter().all(|&(r, c)| {
                self.grid
                    .get(r, c)
                    .map_or(false, |cell| cell.occupant().is_none())
            }),
            None => false,
        }
    }

    /// Place `ship` at `(row, col)` with `orientation`, taking ownership of it.
    pub fn place(
        &mut self,
        mut ship: Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        if ship.is_placed() {
            return Err(BoardError::ShipAlreadyPlaced(ship.kind()));
        }
        let invalid = BoardError::InvalidPlacement {
            kind: ship.kind(),
            row,
            col,
            orientation,
        };
        if !self.can_place(&ship, row, col, orientation) {
            return Err(invalid);
        }
        let cells = self
            .footprint(ship.size(), row, col, orientation)
            .ok_or(invalid)?;
        let id = ShipId(self.ships.len());
        ship.place(id, orientation, cells, &mut self.grid)?;
        debug!("placed {} at ({}, {}) {}", ship.kind(), row, col, orientation);
        self.ships.push(ship);
        Ok(id)
    }

    /// Returns a random non-overlapping `(row, col, orientation)` for a ship of
    /// `size`, or `None` once `MAX_PLACEMENT_ATTEMPTS` have failed.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Option<(usize, usize, Orientation)> {
        let n = self.size();
        if size == 0 || size > n {
            return None;
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let max_r = if orient == Orientation::Vertical { n - size } else { n - 1 };
            let max_c = if orient == Orientation::Horizontal { n - size } else { n - 1 };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            if self.can_place_size(size, r, c, orient) {
                return Some((r, c, orient));
            }
        }
        None
    }

    /// Fire at `(row, col)`.
    ///
    /// Off-board coordinates yield `InvalidShot` without touching the board;
    /// a repeated shot is an error rather than a result.
    pub fn receive_shot(&mut self, row: usize, col: usize) -> Result<ShotResult, BoardError> {
        let cell = match self.grid.get_mut(row, col) {
            Some(cell) => cell,
            None => return Ok(ShotResult::InvalidShot),
        };
        if cell.is_shot() {
            return Err(BoardError::CellAlreadyShot { row, col });
        }
        let id = match cell.occupant() {
            Some(id) => id,
            None => {
                cell.set_state(CellState::Water);
                return Ok(ShotResult::Water);
            }
        };
        cell.set_state(CellState::HitShipPart);
        let sank = match self.ships.get_mut(id.0) {
            Some(ship) => ship.register_hit(&mut self.grid),
            None => false,
        };
        if sank {
            self.sunk_count += 1;
            Ok(ShotResult::Sunk)
        } else {
            Ok(ShotResult::Touch)
        }
    }

    /// `true` once every placed ship is sunk. An empty board is never sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.sunk_count == self.ships.len()
    }

    pub fn has_ship_at(&self, row: usize, col: usize) -> bool {
        self.grid
            .get(row, col)
            .map_or(false, |cell| cell.occupant().is_some())
    }

    pub fn was_shot_at(&self, row: usize, col: usize) -> bool {
        self.grid.get(row, col).map_or(false, Cell::is_shot)
    }

    /// Coordinates that have not been shot yet, row-major.
    pub fn unshot_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.grid
            .cells()
            .filter(|cell| !cell.is_shot())
            .map(Cell::position)
    }

    /// Check that cells, ships and counters agree with each other, for boards
    /// that were decoded rather than built through `place` and `receive_shot`.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.grid.size();
        if n != BOARD_SIZE {
            return Err(format!("board size is {}, expected {}", n, BOARD_SIZE));
        }
        let cell_count = self.grid.cells().count();
        if cell_count != n * n {
            return Err(format!("{} cells on a {}x{} board", cell_count, n, n));
        }
        for (i, cell) in self.grid.cells().enumerate() {
            let pos = cell.position();
            if pos != (i / n, i % n) {
                return Err(format!("cell {} claims position {:?}", i, pos));
            }
            let ship_state = matches!(
                cell.state(),
                CellState::ShipPart | CellState::HitShipPart | CellState::SunkShipPart
            );
            match cell.occupant() {
                Some(id) if id.0 >= self.ships.len() => {
                    return Err(format!("cell {:?} points at missing ship {}", pos, id.0));
                }
                Some(_) if !ship_state => {
                    return Err(format!("occupied cell {:?} is {:?}", pos, cell.state()));
                }
                None if ship_state => {
                    return Err(format!("empty cell {:?} is {:?}", pos, cell.state()));
                }
                _ => {}
            }
        }

        let mut footprint_total = 0;
        for (i, ship) in self.ships.iter().enumerate() {
            let kind = ship.kind();
            let cells = ship.occupied_cells();
            let orientation = match ship.orientation() {
                Some(o) if cells.len() == ship.size() => o,
                _ => return Err(format!("{} #{} is not placed", kind, i)),
            };
            let (row, col) = cells[0];
            let mut hits = 0;
            for (k, &(r, c)) in cells.iter().enumerate() {
                if (r, c) != orientation.step(row, col, k) {
                    return Err(format!("{} #{} is not a straight line", kind, i));
                }
                let cell = self
                    .cell(r, c)
                    .ok_or_else(|| format!("{} #{} leaves the board", kind, i))?;
                if cell.occupant() != Some(ShipId(i)) {
                    return Err(format!("cell ({}, {}) does not belong to {} #{}", r, c, kind, i));
                }
                match cell.state() {
                    CellState::ShipPart => {}
                    CellState::HitShipPart if !ship.is_sunk() => hits += 1,
                    CellState::SunkShipPart if ship.is_sunk() => hits += 1,
                    state => {
                        return Err(format!("cell ({}, {}) of {} #{} is {:?}", r, c, kind, i, state));
                    }
                }
            }
            if hits != ship.hit_count() || ship.is_sunk() != (hits == ship.size()) {
                return Err(format!(
                    "{} #{} records {} hit(s) but {} of its cells are hit",
                    kind,
                    i,
                    ship.hit_count(),
                    hits
                ));
            }
            footprint_total += ship.size();
        }
        if self.occupied_count() != footprint_total {
            return Err(format!(
                "{} occupied cells for ships covering {}",
                self.occupied_count(),
                footprint_total
            ));
        }

        let sunk = self.ships.iter().filter(|s| s.is_sunk()).count();
        if sunk != self.sunk_count {
            return Err(format!("sunk count {} but {} ships are sunk", self.sunk_count, sunk));
        }
        Ok(())
    }

    /// Back to an empty board: fresh cells, no ships, nothing sunk.
    pub fn reset(&mut self) {
        self.grid = Grid::new(BOARD_SIZE);
        self.ships.clear();
        self.sunk_count = 0;
    }
}
