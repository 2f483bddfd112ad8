//! qtictactoe CLI - Tic-tac-toe against a table that learns between sessions
//!
//! This CLI provides:
//! - Interactive games against the learned table
//! - Self-play training
//! - Table statistics and per-state inspection
//!
//! Set `RUST_LOG=debug` to trace every decision and backup.

use anyhow::Result;
use clap::{Parser, Subcommand};
use qtictactoe::cli::commands::{inspect, play, self_play, stats};

#[derive(Parser)]
#[command(name = "qtictactoe")]
#[command(version, about = "Tic-tac-toe with a learned value table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the machine
    Play(play::PlayArgs),

    /// Train the table by playing against itself
    SelfPlay(self_play::SelfPlayArgs),

    /// Show table statistics per ply
    Stats(stats::StatsArgs),

    /// Show stored action values for a state
    Inspect(inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::execute(args),
        Commands::SelfPlay(args) => self_play::execute(args),
        Commands::Stats(args) => stats::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
    }
}
