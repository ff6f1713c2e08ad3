//! maze-duel CLI - Train and watch a Q-learning agent race a scripted
//! opponent for gems
//!
//! This CLI provides:
//! - Multi-episode training with progress and JSON summaries
//! - Single-game simulation with board output
//! - The default configuration as a starting point for config files

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "maze-duel")]
#[command(version, about = "Gem maze duel against a Q-learning agent", long_about = None)]
struct Cli {
    /// Log decisions and game events (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the learning agent over many games
    Train(maze_duel::cli::commands::train::TrainArgs),

    /// Play a single game and print it
    Simulate(maze_duel::cli::commands::simulate::SimulateArgs),

    /// Print the default configuration as JSON
    Config(maze_duel::cli::commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Train(args) => maze_duel::cli::commands::train::execute(args),
        Commands::Simulate(args) => maze_duel::cli::commands::simulate::execute(args),
        Commands::Config(args) => maze_duel::cli::commands::config::execute(args),
    }
}
