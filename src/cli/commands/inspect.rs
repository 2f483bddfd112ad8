//! Inspect command - Show stored action values for one state

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::{
    app::{Session, TableSource},
    cli::{
        config::TableArgs,
        output::{print_kv, print_section, render_board},
    },
    types::SerializedState,
};

#[derive(Parser, Debug)]
#[command(about = "Show the action values stored for a state")]
pub struct InspectArgs {
    /// Serialized state from the acting side's view, e.g. `X---O----`
    #[arg(long, short = 's')]
    pub state: String,

    #[command(flatten)]
    pub table: TableArgs,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let state = SerializedState::parse(&args.state)
        .with_context(|| format!("Invalid --state '{}'", args.state))?;

    let config = args.table.engine_config();
    let session = Session::open(&config);
    if let TableSource::Recovered { reason } = session.source() {
        bail!("Could not read {}: {reason}", config.table_path.display());
    }

    let board = state.to_board();
    print_section(&format!("State {state} (ply {})", state.ply()));
    println!("{}", render_board(&board));

    let ranked = session.table().ranked_actions(&board);
    if ranked.is_empty() {
        println!("  No actions stored for this state.");
        return Ok(());
    }

    let table = session.table();
    for (cell, value) in ranked {
        let replies = table
            .record(state.ply(), &state, cell)
            .map(|r| r.continuations.len())
            .unwrap_or(0);
        print_kv(
            &format!("{cell} {}", cell.label()),
            &format!("{value:.6}  ({replies} replies)"),
        );
    }
    Ok(())
}
