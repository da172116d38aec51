use naval_battle::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde_json::json;

/// Upper bound on shots; a full game needs at most 200.
const MAX_SHOTS: usize = 400;

fn main() -> anyhow::Result<()> {
    naval_battle::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <machine-seed> <player-seed>", args[0]);
        std::process::exit(1);
    }
    let machine_seed: u64 = args[1].parse()?;
    let player_seed: u64 = args[2].parse()?;

    let mut rng = SmallRng::seed_from_u64(player_seed);
    let mut game = Game::with_seed("Simulated", machine_seed)?;
    let report = game.auto_place_human_fleet(&mut rng)?;
    if !report.is_complete() {
        anyhow::bail!("player fleet incomplete: {:?}", report.unplaced);
    }
    game.start_game_play()?;

    let mut player_shots = 0usize;
    let mut machine_shots = 0usize;
    while !game.is_over() && player_shots + machine_shots < MAX_SHOTS {
        match game.state() {
            GameState::PlayerTurn => {
                let open: Vec<(usize, usize)> =
                    game.machine_player().board().unshot_cells().collect();
                let (r, c) = *open
                    .choose(&mut rng)
                    .ok_or_else(|| anyhow::anyhow!("no cells left to shoot"))?;
                game.process_player_shot(r, c)?;
                player_shots += 1;
            }
            GameState::MachineTurn => {
                if game.process_machine_shot()? == ShotResult::InvalidShot {
                    break;
                }
                machine_shots += 1;
            }
            state => anyhow::bail!("unexpected state {:?}", state),
        }
    }

    let winner = match game.winner() {
        Some(Side::Human) => Some("player"),
        Some(Side::Machine) => Some("machine"),
        None => None,
    };
    let result = json!({
        "player": {"shots": player_shots, "sunk": game.machine_ships_sunk_by_human()},
        "machine": {"shots": machine_shots, "sunk": game.human_ships_sunk_by_machine()},
        "winner": winner,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
