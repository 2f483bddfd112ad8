//! Self-play command - Train the table by playing against itself

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{SelfPlayGame, Session},
    cli::{
        config::TableArgs,
        output::{create_self_play_progress, format_number, print_kv, print_section},
    },
    tictactoe::{BoardState, GameOutcome},
};

#[derive(Parser, Debug)]
#[command(about = "Train the table by self-play")]
pub struct SelfPlayArgs {
    /// Number of self-play games
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    #[command(flatten)]
    pub table: TableArgs,

    /// Print every move instead of a progress bar
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

pub fn execute(args: SelfPlayArgs) -> Result<()> {
    let config = args.table.engine_config();
    let mut session = Session::open(&config);

    print_section("Self-play");
    print_kv("Table", &config.table_path.display().to_string());
    print_kv("Games", &format_number(args.games));
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let pb = (!args.verbose).then(|| create_self_play_progress(args.games as u64));
    let mut draws = 0usize;

    let summary = session
        .run_self_play(args.games, |game| {
            if game.outcome == GameOutcome::Draw {
                draws += 1;
            }
            match &pb {
                Some(pb) => {
                    pb.inc(1);
                    let played = pb.position().max(1) as f64;
                    pb.set_message(format!("draws {:.1}%", 100.0 * draws as f64 / played));
                }
                None => print_game(game),
            }
        })
        .context("Self-play failed")?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    print_section("Results");
    print_kv("O wins", &format_number(summary.o_wins));
    print_kv("X wins", &format_number(summary.x_wins));
    print_kv("Draws", &format_number(summary.draws));
    print_kv("Draw rate", &format!("{:.1}%", 100.0 * summary.draw_rate()));
    print_kv("States", &format_number(session.table().state_count()));
    Ok(())
}

fn print_game(game: &SelfPlayGame) {
    let mut board = BoardState::new();
    for m in &game.moves {
        if let Ok(next) = board.place(m.cell, m.player) {
            board = next;
        }
        println!("{} plays {}", m.player, m.cell.label());
        println!("{board}\n");
    }
    println!("Outcome: {:?}\n", game.outcome);
}
