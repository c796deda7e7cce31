//! gogame: command-line front end for the Go rules engine.
//!
//! ## Usage
//!
//! - `gogame` - Play one random game and print the result
//! - `gogame selfplay --games 10 --seed 1` - Random self-play games
//! - `gogame play --randai` - Enter moves on stdin against a random player

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gogame::constants::{DEFAULT_BOARD_SIZE, DEFAULT_KOMI};
use gogame::game::{Action, GameConfig, Session, random_legal_move_with};
use gogame::scoring::RewardPolicy;

/// gogame: a Go rules engine
#[derive(Parser)]
#[command(name = "gogame")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size (NxN)
    #[arg(long, global = true, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Points given to white
    #[arg(long, global = true, default_value_t = DEFAULT_KOMI)]
    komi: f32,
    /// Reward policy: real or heuristic
    #[arg(long, global = true, default_value = "real")]
    reward: RewardPolicy,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play random legal moves until both sides pass
    Selfplay {
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Read moves from stdin (`D4`, `row,col`, an index, or `pass`)
    Play {
        /// Answer every move with a random legal move
        #[arg(long)]
        randai: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GameConfig {
        board_size: cli.size,
        komi: cli.komi,
        reward_policy: cli.reward,
    };
    let session = Session::new(config).context("creating session")?;

    match cli.command {
        Some(Commands::Play { randai }) => run_play(session, randai),
        Some(Commands::Selfplay { games, seed }) => run_selfplay(session, games, seed),
        None => run_selfplay(session, 1, None),
    }
}

fn run_selfplay(mut session: Session, games: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    for game in 1..=games {
        session.reset();
        let mut reward = 0.0;
        while !session.is_done() {
            let action = random_legal_move_with(session.state(), &mut rng);
            reward = session.play(action)?.reward;
        }
        let (black, white) = session.areas();
        println!("=== Game {game} ({} moves) ===", session.move_number());
        println!("{}", session.state());
        println!(
            "Black area {black}, white area {white}, komi {}: reward {reward}",
            session.config().komi
        );
    }
    Ok(())
}

fn run_play(mut session: Session, randai: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut rng = fastrand::Rng::new();
    let size = session.config().board_size;

    println!("{}", session.state());
    print!("{} to move> ", session.turn());
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") {
            break;
        }

        let result = Action::parse(line, size).and_then(|a| session.play(a));
        match result {
            Ok(step) => {
                if randai && !step.done {
                    let reply = random_legal_move_with(session.state(), &mut rng);
                    session.play(reply)?;
                    println!("random player: {}", describe(reply, size));
                }
            }
            Err(e) => println!("{e}"),
        }

        println!("{}", session.state());
        if session.is_done() {
            let (black, white) = session.areas();
            println!("Game over. Black {black}, white {white}, reward {}", session.reward());
            break;
        }
        print!("{} to move> ", session.turn());
        stdout.flush()?;
    }
    Ok(())
}

fn describe(action: Action, size: usize) -> String {
    match action {
        Action::Pass => "pass".to_string(),
        Action::Move(pt) => gogame::board::vertex_name(pt, size),
    }
}
