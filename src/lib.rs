//! Game-state engine for a one-player naval battle against the computer:
//! boards, fleet placement, shot resolution, turn order and the machine
//! opponent. Rendering and persistence helpers sit alongside the engine but
//! the engine itself performs no I/O.

mod board;
mod cell;
pub mod cli;
mod common;
mod config;
mod game;
mod logging;
pub mod persistence;
mod player;
mod player_ai;
pub mod prelude;
mod ship;

pub use board::*;
pub use cell::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use logging::{init_logging, init_logging_at, level_from_env, LOG_ENV};
pub use persistence::{status_report, PersistenceError, SaveStore};
pub use player::*;
pub use player_ai::*;
pub use ship::*;
