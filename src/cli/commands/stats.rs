//! Stats command - Summarize the persisted table per ply

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    app::{Session, TableSource},
    cli::{
        config::TableArgs,
        output::{format_number, print_kv, print_section},
    },
};

#[derive(Parser, Debug)]
#[command(about = "Show value table statistics")]
pub struct StatsArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Print the statistics as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn execute(args: StatsArgs) -> Result<()> {
    let config = args.table.engine_config();
    let session = Session::open(&config);
    if let TableSource::Recovered { reason } = session.source() {
        bail!("Could not read {}: {reason}", config.table_path.display());
    }

    let stats = session.table().stats();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    print_section(&format!("Value table: {}", config.table_path.display()));
    println!("  {:>4} {:>8} {:>8} {:>10}", "ply", "states", "actions", "mean");
    for ply in &stats.per_ply {
        let mean = ply
            .mean_value
            .map(|v| format!("{v:.4}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>4} {:>8} {:>8} {:>10}",
            ply.ply,
            format_number(ply.states),
            format_number(ply.records),
            mean
        );
    }
    println!();
    print_kv("Total states", &format_number(stats.total_states()));
    print_kv("Total actions", &format_number(stats.total_records()));
    Ok(())
}
