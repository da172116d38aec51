//! Saving and loading whole games, plus the human-readable status report.
//!
//! The engine itself never touches the filesystem; the application calls
//! into this module after each mutating operation.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::info;
use thiserror::Error;

use crate::game::{Game, GameState};
use crate::player::{Player, Side};

const GAME_FILE: &str = "current_game.bin";
const REPORT_FILE: &str = "game_info.txt";

/// Errors raised while saving or restoring a game.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("encoding error: {0}")]
    Encode(#[from] bincode::Error),
    #[error("no saved game at {}", .0.display())]
    NoSavedGame(PathBuf),
    #[error("saved game is inconsistent: {0}")]
    Inconsistent(String),
}

/// Directory holding the saved game and its report.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn game_path(&self) -> PathBuf {
        self.dir.join(GAME_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join(REPORT_FILE)
    }

    /// Write the full game state and refresh the status report.
    pub fn save_game(&self, game: &Game) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let bytes = bincode::serialize(game)?;
        fs::write(self.game_path(), bytes)?;
        fs::write(self.report_path(), status_report(game))?;
        info!("game saved to {}", self.game_path().display());
        Ok(())
    }

    pub fn load_game(&self) -> Result<Game, PersistenceError> {
        let path = self.game_path();
        if !path.exists() {
            return Err(PersistenceError::NoSavedGame(path));
        }
        let bytes = fs::read(&path)?;
        let game: Game = bincode::deserialize(&bytes)?;
        game.validate().map_err(PersistenceError::Inconsistent)?;
        info!("game loaded from {}", path.display());
        Ok(game)
    }

    pub fn has_saved_game(&self) -> bool {
        self.game_path().exists()
    }

    /// Remove the saved game and report. Missing files are not an error.
    pub fn delete_save(&self) -> Result<(), PersistenceError> {
        for path in [self.game_path(), self.report_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub fn load_report(&self) -> Option<String> {
        fs::read_to_string(self.report_path()).ok()
    }
}

/// Plain-text summary of a game: who is playing, whose turn it is, the
/// score on both sides and how far the game has progressed.
pub fn status_report(game: &Game) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== GAME STATE ===");
    let _ = writeln!(out, "Player nickname: {}", game.human_nickname());
    let _ = writeln!(out, "Current state: {:?}", game.state());
    let _ = writeln!(out, "Current turn: {}", game.current_player().name());
    let _ = writeln!(out);
    let _ = writeln!(out, "=== STATISTICS ===");
    let _ = writeln!(out, "Ships sunk by the player: {}", game.machine_ships_sunk_by_human());
    let _ = writeln!(out, "Ships sunk by the machine: {}", game.human_ships_sunk_by_machine());
    let _ = writeln!(out, "Player ships on board: {}", game.human_player().board().ships().len());
    let _ = writeln!(out, "Machine ships on board: {}", game.machine_player().board().ships().len());
    let _ = writeln!(out);
    let _ = writeln!(out, "=== PROGRESS ===");
    match game.winner() {
        Some(side) => {
            let _ = writeln!(out, "Game over");
            let name = match side {
                Side::Human => game.human_nickname(),
                Side::Machine => game.machine_player().name(),
            };
            let _ = writeln!(out, "Winner: {}", name);
        }
        None if game.state() == GameState::ShipPlacement && !game.all_human_ships_placed() => {
            let _ = writeln!(out, "Game in progress");
            let _ = writeln!(
                out,
                "Ships left to place: {}",
                game.ships_remaining_for_human().len()
            );
        }
        None => {
            let _ = writeln!(out, "Game in progress");
            let _ = writeln!(out, "All player ships are placed");
        }
    }
    out
}
