use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::common::{GameError, PlacementReport};

/// Which of the two players an operation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Human,
    Machine,
}

/// Interface implemented by both player types.
pub trait Player {
    fn name(&self) -> &str;

    /// The player's own board.
    fn board(&self) -> &Board;

    fn board_mut(&mut self) -> &mut Board;

    /// Place the player's fleet onto its own board.
    fn place_ships(&mut self) -> PlacementReport;

    /// Choose the next target on `opponent`. `Ok(None)` means nothing is left
    /// to shoot at.
    fn next_shot(&mut self, opponent: &Board) -> Result<Option<(usize, usize)>, GameError>;
}

/// Validate a display name: non-empty once surrounding whitespace is trimmed.
pub(crate) fn checked_name(name: &str) -> Result<String, GameError> {
    if name.trim().is_empty() {
        Err(GameError::InvalidName)
    } else {
        Ok(name.to_string())
    }
}

/// The person at the keyboard. Ships and shots both arrive through `Game`
/// from the interface, so the trait methods here do no work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanPlayer {
    name: String,
    board: Board,
}

impl HumanPlayer {
    pub fn new(name: &str) -> Result<Self, GameError> {
        Ok(Self {
            name: checked_name(name)?,
            board: Board::new(),
        })
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    fn place_ships(&mut self) -> PlacementReport {
        PlacementReport::default()
    }

    fn next_shot(&mut self, _opponent: &Board) -> Result<Option<(usize, usize)>, GameError> {
        Err(GameError::ExternalTargeting)
    }
}
