//! Othello-Rust: play Othello against a random-sampling computer opponent.
//!
//! ## Usage
//!
//! - `othello` - Play as Black against the computer
//! - `othello --human white` - Play as White
//! - `othello --simulations 500 --seed 42` - Stronger, reproducible opponent
//! - `othello demo` - Watch the computer play itself
//!
//! Set `RUST_LOG=debug` to see the selector's decisions on stderr.

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use othello_rust::board::Side;
use othello_rust::console::Console;
use othello_rust::constants::N_SIMS;
use othello_rust::selector::Selector;

/// Othello-Rust: Othello against a random-sampling opponent
#[derive(Parser)]
#[command(name = "othello")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Sampling trials the computer runs per move
    #[arg(long, default_value_t = N_SIMS)]
    simulations: usize,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Colour played by the human
    #[arg(long, value_enum, default_value_t = Colour::Black)]
    human: Colour,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal (default)
    Play,
    /// Let the computer play both sides
    Demo,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Colour {
    Black,
    White,
}

impl From<Colour> for Side {
    fn from(colour: Colour) -> Self {
        match colour {
            Colour::Black => Side::Black,
            Colour::White => Side::White,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let selector = match cli.seed {
        Some(seed) => Selector::with_seed(cli.simulations, seed),
        None => Selector::new(cli.simulations),
    };
    let human = match cli.command {
        Some(Commands::Demo) => None,
        Some(Commands::Play) | None => Some(Side::from(cli.human)),
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), selector).with_human(human);
    console.run().context("game aborted")?;

    Ok(())
}
