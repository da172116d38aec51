//! Turn order and the game state machine for one human against the machine.

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::common::{BoardError, GameError, PlacementReport, ShotResult};
use crate::config::{FLEET, MACHINE_NAME};
use crate::player::{HumanPlayer, Player, Side};
use crate::player_ai::{place_fleet_randomly, MachinePlayer};
use crate::ship::{Orientation, Ship, ShipKind};

/// Phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Initializing,
    ShipPlacement,
    PlayerTurn,
    MachineTurn,
    GameOverHumanWins,
    GameOverMachineWins,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameState::GameOverHumanWins | GameState::GameOverMachineWins
        )
    }
}

/// A complete game. Every field is plain data, so the whole value can be
/// persisted after each mutating call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    human: HumanPlayer,
    machine: MachinePlayer,
    current: Side,
    state: GameState,
    machine_placement: PlacementReport,
}

impl Game {
    /// Start a game for `nickname`. The machine lays out its fleet here.
    pub fn new(nickname: &str) -> Result<Self, GameError> {
        Self::with_machine(nickname, MachinePlayer::new(MACHINE_NAME)?)
    }

    /// Like [`Game::new`], with the machine's randomness fixed by `seed`.
    pub fn with_seed(nickname: &str, seed: u64) -> Result<Self, GameError> {
        Self::with_machine(nickname, MachinePlayer::with_seed(MACHINE_NAME, seed)?)
    }

    fn with_machine(nickname: &str, mut machine: MachinePlayer) -> Result<Self, GameError> {
        let human = HumanPlayer::new(nickname)?;
        let machine_placement = machine.place_ships();
        if !machine_placement.is_complete() {
            warn!(
                "machine fleet is short: {:?} could not be placed",
                machine_placement.unplaced
            );
        }
        info!("new game for {}", human.name());
        Ok(Self {
            human,
            machine,
            current: Side::Human,
            state: GameState::ShipPlacement,
            machine_placement,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Side currently allowed to shoot.
    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn current_player(&self) -> &dyn Player {
        match self.current {
            Side::Human => &self.human,
            Side::Machine => &self.machine,
        }
    }

    pub fn human_player(&self) -> &HumanPlayer {
        &self.human
    }

    pub fn machine_player(&self) -> &MachinePlayer {
        &self.machine
    }

    pub fn human_nickname(&self) -> &str {
        self.human.name()
    }

    /// Outcome of the machine's fleet layout made at construction.
    pub fn machine_placement(&self) -> &PlacementReport {
        &self.machine_placement
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn winner(&self) -> Option<Side> {
        match self.state {
            GameState::GameOverHumanWins => Some(Side::Human),
            GameState::GameOverMachineWins => Some(Side::Machine),
            _ => None,
        }
    }

    pub fn human_ships_sunk_by_machine(&self) -> usize {
        self.human.board().sunk_count()
    }

    pub fn machine_ships_sunk_by_human(&self) -> usize {
        self.machine.board().sunk_count()
    }

    /// Fleet kinds the human still has to place. One placed ship cancels one
    /// entry of its kind.
    pub fn ships_remaining_for_human(&self) -> Vec<ShipKind> {
        remaining_fleet(self.human.board())
    }

    pub fn all_human_ships_placed(&self) -> bool {
        self.ships_remaining_for_human().is_empty()
    }

    /// Check a game that was decoded rather than played: both boards hold
    /// together, neither carries more than the fleet, and the phase agrees
    /// with the turn and with which fleets are sunk.
    pub fn validate(&self) -> Result<(), String> {
        for player in [&self.human as &dyn Player, &self.machine as &dyn Player] {
            let board = player.board();
            board
                .validate()
                .map_err(|e| format!("{}'s board: {}", player.name(), e))?;
            if board.ships().len() + remaining_fleet(board).len() != FLEET.len() {
                return Err(format!("{}'s board holds ships outside the fleet", player.name()));
            }
        }
        let human_sunk = self.human.board().all_sunk();
        let machine_sunk = self.machine.board().all_sunk();
        let in_play = !human_sunk && !machine_sunk && self.all_human_ships_placed();
        let consistent = match self.state {
            GameState::Initializing => false,
            GameState::ShipPlacement => self.current == Side::Human && !human_sunk && !machine_sunk,
            GameState::PlayerTurn => self.current == Side::Human && in_play,
            GameState::MachineTurn => self.current == Side::Machine && in_play,
            GameState::GameOverHumanWins => machine_sunk,
            GameState::GameOverMachineWins => human_sunk,
        };
        if consistent {
            Ok(())
        } else {
            Err(format!(
                "state {:?} on the {:?} turn does not match the boards",
                self.state, self.current
            ))
        }
    }

    fn illegal(&self, operation: &'static str) -> GameError {
        GameError::IllegalState {
            operation,
            state: self.state,
            turn: self.current,
        }
    }

    fn transition(&mut self, state: GameState, current: Side) {
        debug!(
            "{:?}/{:?} -> {:?}/{:?}",
            self.state, self.current, state, current
        );
        self.state = state;
        self.current = current;
        if let Some(side) = self.winner() {
            info!("game over, {:?} wins", side);
        }
    }

    fn require_placement(&self, operation: &'static str) -> Result<(), GameError> {
        if self.state == GameState::ShipPlacement {
            Ok(())
        } else {
            Err(self.illegal(operation))
        }
    }

    /// Place one of the human's ships. Only legal during ship placement.
    pub fn place_human_ship(
        &mut self,
        ship: Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        self.require_placement("place_human_ship")?;
        if !self.ships_remaining_for_human().contains(&ship.kind()) {
            return Err(GameError::ShipNotInFleet(ship.kind()));
        }
        self.human.board_mut().place(ship, row, col, orientation)?;
        Ok(())
    }

    /// Remove every ship the human has placed so far.
    pub fn clear_human_board(&mut self) -> Result<(), GameError> {
        self.require_placement("clear_human_board")?;
        self.human.board_mut().reset();
        Ok(())
    }

    /// Lay out the human fleet at random, with the same shuffled passes and
    /// retries the machine uses. Anything placed by hand is discarded.
    pub fn auto_place_human_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<PlacementReport, GameError> {
        self.require_placement("auto_place_human_fleet")?;
        let owner = self.human.name().to_string();
        let report = place_fleet_randomly(&owner, self.human.board_mut(), rng);
        if !report.is_complete() {
            warn!("{} fleet is short: {:?} could not be placed", owner, report.unplaced);
        }
        Ok(report)
    }

    /// Leave placement once the human fleet is complete, or resume the
    /// human's turn after a reload.
    pub fn start_game_play(&mut self) -> Result<(), GameError> {
        match self.state {
            GameState::ShipPlacement if self.all_human_ships_placed() => {
                info!("{} starts firing", self.human.name());
                self.transition(GameState::PlayerTurn, Side::Human);
                Ok(())
            }
            GameState::PlayerTurn | GameState::MachineTurn if self.current == Side::Human => {
                self.transition(GameState::PlayerTurn, Side::Human);
                Ok(())
            }
            _ => Err(self.illegal("start_game_play")),
        }
    }

    /// Fire the human's shot at the machine board. Water passes the turn;
    /// a hit or sink lets the human fire again.
    pub fn process_player_shot(&mut self, row: usize, col: usize) -> Result<ShotResult, GameError> {
        if self.current != Side::Human || self.state != GameState::PlayerTurn {
            return Err(self.illegal("process_player_shot"));
        }
        let result = self.machine.board_mut().receive_shot(row, col)?;
        debug!("{} fired at ({}, {}): {:?}", self.human.name(), row, col, result);
        if self.machine.board().all_sunk() {
            self.transition(GameState::GameOverHumanWins, Side::Human);
        } else if result == ShotResult::Water {
            self.transition(GameState::MachineTurn, Side::Machine);
        }
        Ok(result)
    }

    /// Let the machine pick and fire one shot. The caller repeats this while
    /// the machine keeps the turn.
    pub fn process_machine_shot(&mut self) -> Result<ShotResult, GameError> {
        if self.current != Side::Machine || self.state != GameState::MachineTurn {
            return Err(self.illegal("process_machine_shot"));
        }
        let (row, col) = match self.machine.next_shot(self.human.board())? {
            Some(target) => target,
            None => {
                if self.human.board().all_sunk() {
                    self.transition(GameState::GameOverMachineWins, Side::Machine);
                } else if self.machine.board().all_sunk() {
                    self.transition(GameState::GameOverHumanWins, Side::Human);
                }
                return Ok(ShotResult::InvalidShot);
            }
        };
        let result = match self.human.board_mut().receive_shot(row, col) {
            Ok(result) => result,
            Err(BoardError::CellAlreadyShot { .. }) => {
                warn!("machine picked ({}, {}) which was already shot", row, col);
                self.transition(GameState::PlayerTurn, Side::Human);
                return Ok(ShotResult::AlreadyShot);
            }
            Err(err) => return Err(err.into()),
        };
        debug!("machine fired at ({}, {}): {:?}", row, col, result);
        if self.human.board().all_sunk() {
            self.transition(GameState::GameOverMachineWins, Side::Machine);
        } else if result == ShotResult::Water {
            self.transition(GameState::PlayerTurn, Side::Human);
        }
        Ok(result)
    }
}

fn remaining_fleet(board: &Board) -> Vec<ShipKind> {
    let mut remaining = FLEET.to_vec();
    for ship in board.ships() {
        if let Some(pos) = remaining.iter().position(|&k| k == ship.kind()) {
            remaining.remove(pos);
        }
    }
    remaining
}
