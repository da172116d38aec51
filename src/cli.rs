//! Terminal helpers: coordinate parsing and text rendering of boards.

use std::fmt::Write as _;

use crate::board::Board;
use crate::cell::CellState;
use crate::config::BOARD_SIZE;
use crate::ship::Orientation;

/// Format `(row, col)` as e.g. `A5` (column letter, 1-based row).
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse a coordinate such as `A5` or `j10` into `(row, col)`.
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 {
        return Err("Row cannot be 0 - must be 1-10".to_string());
    }
    if row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok((row - 1, col))
}

/// Parse `H`/`V` (any case, full words accepted).
pub fn parse_orientation(input: &str) -> Result<Orientation, String> {
    match input.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('H') => Ok(Orientation::Horizontal),
        Some('V') => Ok(Orientation::Vertical),
        Some(other) => Err(format!("Invalid orientation '{}' - use H or V", other)),
        None => Err("Missing orientation - use H or V".to_string()),
    }
}

fn cell_char(state: CellState, reveal: bool) -> char {
    match state {
        CellState::HitShipPart => 'X',
        CellState::SunkShipPart => '#',
        CellState::Water => 'o',
        CellState::ShipPart if reveal => 'S',
        CellState::ShipPart | CellState::Empty => '.',
    }
}

/// Draw `board`. Unhit ships are only shown when `reveal` is set.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..board.size() {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for (r, row) in board.rows().enumerate() {
        let _ = write!(out, "  {:2}", r + 1);
        for cell in row {
            let _ = write!(out, " {}", cell_char(cell.state(), reveal));
        }
        out.push('\n');
    }
    if reveal {
        out.push_str("  Legend: S=Ship  X=Hit  #=Sunk  o=Water  .=Empty\n");
    } else {
        out.push_str("  Legend: X=Hit  #=Sunk  o=Water  .=Unknown\n");
    }
    out
}
