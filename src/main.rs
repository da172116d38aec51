use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use naval_battle::cli::{coord_to_string, parse_coord, parse_orientation, render_board};
use naval_battle::{
    init_logging, Game, GameError, GameState, Player, SaveStore, Ship, ShotResult, Side,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the machine in the terminal.
    Play {
        /// Your nickname.
        #[arg(default_value = "Player")]
        nickname: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value = "game_saves")]
        save_dir: PathBuf,
        /// Place your whole fleet at random instead of ship by ship.
        #[arg(long)]
        auto_place: bool,
        /// Show the machine's ships.
        #[arg(long)]
        reveal: bool,
        /// Continue the saved game instead of starting a new one.
        #[arg(long)]
        resume: bool,
        /// Pause before each machine shot, in milliseconds.
        #[arg(long, default_value_t = 600)]
        delay_ms: u64,
    },
    /// Print the report of the saved game.
    Status {
        #[arg(long, default_value = "game_saves")]
        save_dir: PathBuf,
    },
    /// Delete the saved game.
    Reset {
        #[arg(long, default_value = "game_saves")]
        save_dir: PathBuf,
    },
}

struct Session {
    game: Game,
    store: SaveStore,
    rng: SmallRng,
    reveal: bool,
    delay: Duration,
}

fn prompt(msg: &str) -> anyhow::Result<Option<String>> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

impl Session {
    fn save(&self) {
        if let Err(e) = self.store.save_game(&self.game) {
            log::warn!("autosave failed: {}", e);
        }
    }

    fn print_boards(&self) {
        println!("\nEnemy waters:");
        print!("{}", render_board(self.game.machine_player().board(), self.reveal));
        println!("\nYour fleet:");
        print!("{}", render_board(self.game.human_player().board(), true));
    }

    /// Returns `false` if input ended before the fleet was complete.
    fn place_fleet(&mut self, auto: bool) -> anyhow::Result<bool> {
        if auto {
            let report = self.game.auto_place_human_fleet(&mut self.rng)?;
            if !report.is_complete() {
                anyhow::bail!("could not fit {:?} on the board", report.unplaced);
            }
            self.save();
        }
        while !self.game.all_human_ships_placed() {
            print!("{}", render_board(self.game.human_player().board(), true));
            let remaining = self.game.ships_remaining_for_human();
            let kind = remaining[0];
            println!(
                "Ships left: {}. Next: {} (length {})",
                remaining.len(),
                kind,
                kind.size()
            );
            let line = match prompt("Placement (e.g. A5 H, 'auto' or 'clear'): ")? {
                Some(line) => line,
                None => return Ok(false),
            };
            if line.eq_ignore_ascii_case("auto") {
                return self.place_fleet(true);
            }
            if line.eq_ignore_ascii_case("clear") {
                self.game.clear_human_board()?;
                self.save();
                continue;
            }
            let mut parts = line.split_whitespace();
            let coord = parts.next().map(parse_coord);
            let orient = parse_orientation(parts.next().unwrap_or("H"));
            let ((row, col), orientation) = match (coord, orient) {
                (Some(Ok(coord)), Ok(o)) => (coord, o),
                (Some(Err(e)), _) | (_, Err(e)) => {
                    println!("✗ {}", e);
                    continue;
                }
                (None, _) => continue,
            };
            match self.game.place_human_ship(Ship::new(kind), row, col, orientation) {
                Ok(()) => {
                    println!("✓ {} placed at {}", kind, coord_to_string(row, col));
                    self.save();
                }
                Err(GameError::Board(e)) => println!("✗ {}", e),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(true)
    }

    fn human_turn(&mut self) -> anyhow::Result<bool> {
        self.print_boards();
        let line = match prompt("\nTarget (e.g. B7): ")? {
            Some(line) => line,
            None => return Ok(false),
        };
        let (row, col) = match parse_coord(&line) {
            Ok(coord) => coord,
            Err(e) => {
                println!("✗ {}", e);
                return Ok(true);
            }
        };
        match self.game.process_player_shot(row, col) {
            Ok(result) => {
                announce("You", row, col, result);
                self.save();
            }
            Err(GameError::Board(e)) => println!("✗ {}", e),
            Err(e) => return Err(e.into()),
        }
        Ok(true)
    }

    fn machine_turn(&mut self) -> anyhow::Result<()> {
        while self.game.state() == GameState::MachineTurn {
            thread::sleep(self.delay);
            let before: Vec<(usize, usize)> =
                self.game.human_player().board().unshot_cells().collect();
            let result = self.game.process_machine_shot()?;
            self.save();
            let board = self.game.human_player().board();
            match before.into_iter().find(|&(r, c)| board.was_shot_at(r, c)) {
                Some((row, col)) => announce("Machine", row, col, result),
                None => println!("Machine fires: {:?}", result),
            }
            if result == ShotResult::InvalidShot && !self.game.is_over() {
                anyhow::bail!("machine has no target left");
            }
        }
        Ok(())
    }

    fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match self.game.state() {
                GameState::PlayerTurn => {
                    if !self.human_turn()? {
                        println!("\nGame saved. Resume with --resume.");
                        return Ok(());
                    }
                }
                GameState::MachineTurn => self.machine_turn()?,
                GameState::GameOverHumanWins | GameState::GameOverMachineWins => break,
                GameState::ShipPlacement | GameState::Initializing => {
                    anyhow::bail!("game left placement without starting")
                }
            }
        }
        self.reveal = true;
        self.print_boards();
        match self.game.winner() {
            Some(Side::Human) => println!("\nVICTORY! You sank the whole enemy fleet."),
            Some(Side::Machine) => println!("\nDEFEAT. All your ships have been destroyed."),
            None => {}
        }
        Ok(())
    }
}

fn announce(who: &str, row: usize, col: usize, result: ShotResult) {
    let at = coord_to_string(row, col);
    match result {
        ShotResult::Water => println!("{} fired at {}: water.", who, at),
        ShotResult::Touch => println!("{} fired at {}: hit! Fire again.", who, at),
        ShotResult::Sunk => println!("{} fired at {}: ship sunk! Fire again.", who, at),
        ShotResult::AlreadyShot => println!("{} fired at {}: already shot.", who, at),
        ShotResult::InvalidShot => println!("{} fired at {}: off the board.", who, at),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            nickname,
            seed,
            save_dir,
            auto_place,
            reveal,
            resume,
            delay_ms,
        } => {
            let store = SaveStore::new(save_dir);
            let rng = match seed {
                Some(s) => {
                    println!("Using fixed seed: {} (game will be reproducible)", s);
                    SmallRng::seed_from_u64(s)
                }
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let game = if resume {
                store.load_game()?
            } else {
                match seed {
                    Some(s) => Game::with_seed(&nickname, s.wrapping_add(1))?,
                    None => Game::new(&nickname)?,
                }
            };
            println!("Welcome, {}!", game.human_nickname());
            let mut session = Session {
                game,
                store,
                rng,
                reveal,
                delay: Duration::from_millis(delay_ms),
            };
            session.save();
            if session.game.state() == GameState::ShipPlacement {
                if !session.place_fleet(auto_place)? {
                    return Ok(());
                }
            }
            if !session.game.is_over() {
                session.game.start_game_play().or_else(|e| match e {
                    GameError::IllegalState {
                        state: GameState::MachineTurn,
                        ..
                    } => Ok(()),
                    e => Err(e),
                })?;
            }
            session.save();
            session.run()?;
        }
        Commands::Status { save_dir } => {
            let store = SaveStore::new(save_dir);
            match store.load_report() {
                Some(report) => print!("{}", report),
                None => println!("No saved game information."),
            }
        }
        Commands::Reset { save_dir } => {
            SaveStore::new(save_dir).delete_save()?;
            println!("Saved game deleted.");
        }
    }
    Ok(())
}
