//! Play command - Interactive game against the learned table

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    app::{HUMAN, HumanGame, MACHINE, Session, TableSource},
    cli::{config::TableArgs, output::render_board},
    error::Error,
    tictactoe::{Cell, GameOutcome},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the machine (you are X)")]
pub struct PlayArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

/// Results of an interactive run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaySummary {
    pub games: usize,
    pub human_wins: usize,
    pub machine_wins: usize,
    pub draws: usize,
}

impl PlaySummary {
    fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::Win(p) if p == HUMAN => self.human_wins += 1,
            GameOutcome::Win(_) => self.machine_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Message announcing the end of a game
pub fn outcome_message(outcome: GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::Win(p) if p == HUMAN => "You won",
        GameOutcome::Win(_) => "The machine won",
        GameOutcome::Draw => "Draw",
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.table.engine_config();
    let mut session = Session::open(&config);
    if let TableSource::Recovered { reason } = session.source() {
        println!("Could not read {}: {reason}", config.table_path.display());
        println!("Starting from an empty table.");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = run(&mut session, stdin.lock(), stdout.lock())?;

    println!(
        "\nGames: {}  You: {}  Machine: {}  Draws: {}",
        summary.games, summary.human_wins, summary.machine_wins, summary.draws
    );
    Ok(())
}

/// Drive games over a line-based reader and writer until the user quits.
///
/// End of input counts as quitting. Unknown or occupied cells are reported
/// and the user is asked again.
pub fn run<R, W>(session: &mut Session, mut input: R, mut out: W) -> Result<PlaySummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = PlaySummary::default();

    loop {
        let (mut game, opening) = HumanGame::start(session).context("Failed to start game")?;
        match opening {
            Some(cell) => {
                writeln!(out, "The machine starts")?;
                writeln!(out, "The machine plays {}", cell.label())?;
            }
            None => writeln!(out, "You start")?,
        }

        let outcome = loop {
            write!(out, "\n{}\nYour move ({HUMAN}): ", render_board(game.state()))?;
            out.flush()?;

            let Some(line) = read_line(&mut input)? else {
                return Ok(summary);
            };
            if is_quit(&line) {
                return Ok(summary);
            }

            let cell = match line.parse::<Cell>() {
                Ok(cell) => cell,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            };

            let turn = match game.human_move(session, cell) {
                Ok(turn) => turn,
                Err(e @ Error::CellOccupied { .. }) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
                Err(e) => return Err(e).context("Failed to play move"),
            };

            if let Some(reply) = turn.machine_move {
                writeln!(out, "The machine ({MACHINE}) plays {}", reply.label())?;
            }
            if let Some(outcome) = turn.outcome {
                break outcome;
            }
        };

        summary.record(outcome);
        writeln!(out, "\n{}", render_board(game.state()))?;
        writeln!(out, "{}", outcome_message(outcome))?;

        write!(out, "Play again? [y/N] ")?;
        out.flush()?;
        match read_line(&mut input)? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
            _ => return Ok(summary),
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim().to_string()))
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}
