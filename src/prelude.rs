//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, Game, GameError, GameState, MachinePlayer, Orientation, Player, Ship, ShipKind,
    ShotResult, Side,
};
