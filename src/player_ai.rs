use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::common::{GameError, PlacementReport};
use crate::config::{FLEET, MAX_FLEET_PASSES};
use crate::player::{checked_name, Player};
use crate::ship::{Ship, ShipKind};

fn entropy_rng() -> SmallRng {
    SmallRng::from_rng(&mut rand::rng())
}

/// Computer opponent: random fleet layout and uniform random targeting over
/// the cells it has not shot yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachinePlayer {
    name: String,
    board: Board,
    #[serde(skip, default = "entropy_rng")]
    rng: SmallRng,
}

impl MachinePlayer {
    pub fn new(name: &str) -> Result<Self, GameError> {
        Self::with_rng(name, entropy_rng())
    }

    /// Machine whose placements and shots are reproducible from `seed`.
    pub fn with_seed(name: &str, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(name, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(name: &str, rng: SmallRng) -> Result<Self, GameError> {
        Ok(Self {
            name: checked_name(name)?,
            board: Board::new(),
            rng,
        })
    }
}

/// One shuffled pass over the fleet. Returns the kinds that found no spot.
fn placement_pass<R: Rng + ?Sized>(owner: &str, board: &mut Board, rng: &mut R) -> Vec<ShipKind> {
    let mut order = FLEET.to_vec();
    order.shuffle(rng);

    let mut unplaced = Vec::new();
    for kind in order {
        let placed = match board.random_placement(rng, kind.size()) {
            Some((row, col, orientation)) => {
                match board.place(Ship::new(kind), row, col, orientation) {
                    Ok(_) => {
                        debug!("{} placed {} at ({}, {}) {}", owner, kind, row, col, orientation);
                        true
                    }
                    Err(err) => {
                        warn!("{} could not place {}: {}", owner, kind, err);
                        false
                    }
                }
            }
            None => false,
        };
        if !placed {
            warn!("{} ran out of attempts for {}", owner, kind);
            unplaced.push(kind);
        }
    }
    unplaced
}

/// Lay out the whole fleet on `board` at random. A pass that leaves a ship
/// behind is thrown away and retried on a clean board, up to
/// `MAX_FLEET_PASSES`; after that the short fleet stands and is reported.
pub(crate) fn place_fleet_randomly<R: Rng + ?Sized>(
    owner: &str,
    board: &mut Board,
    rng: &mut R,
) -> PlacementReport {
    let mut unplaced = Vec::new();
    for pass in 1..=MAX_FLEET_PASSES {
        board.reset();
        unplaced = placement_pass(owner, board, rng);
        if unplaced.is_empty() {
            break;
        }
        warn!(
            "{}: placement pass {}/{} left {} ship(s) unplaced",
            owner,
            pass,
            MAX_FLEET_PASSES,
            unplaced.len()
        );
    }
    PlacementReport { unplaced }
}

impl Player for MachinePlayer {
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
        place_fleet_randomly(&self.name, &mut self.board, &mut self.rng)
    }

    fn next_shot(&mut self, opponent: &Board) -> Result<Option<(usize, usize)>, GameError> {
        let available: Vec<(usize, usize)> = opponent.unshot_cells().collect();
        Ok(available.choose(&mut self.rng).copied())
    }
}
