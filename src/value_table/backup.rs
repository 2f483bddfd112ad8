//! Credit assignment: propagating a finished game's outcome backward
//!
//! The terminal decision receives the reward outright. Every earlier ply of
//! the same parity is then swept in full: each record moves toward the
//! worst case, over its resolvable continuations, of the best action value
//! recorded two plies later:
//!
//! ```text
//! backup = min_c max_a' V(p+2, c, a')
//! V(p, s, a) ← V(p, s, a) + α·γ·(backup − V(p, s, a))
//! ```
//!
//! Records with no continuation present in the table are left alone. The
//! sweep walks plies downward, so ply `p` sees ply `p+2` values already
//! updated by the same sweep.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::Ply,
    value_table::{policy::Decision, table::ValueTable},
};

/// Step size α of the temporal-difference blend
pub const LEARNING_RATE: f64 = 0.5;

/// Discount γ applied to the backed-up estimate
pub const DISCOUNT_FACTOR: f64 = 0.9;

/// Terminal reward from the acting side's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reward {
    Loss,
    Draw,
    Win,
}

impl Reward {
    pub fn value(self) -> f64 {
        match self {
            Reward::Loss => 0.0,
            Reward::Draw => 0.5,
            Reward::Win => 1.0,
        }
    }
}

/// What one call to [`apply_outcome`] changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupReport {
    pub terminal_ply: Ply,
    pub plies_swept: Vec<Ply>,
    pub records_updated: usize,
}

/// Single temporal-difference step from `current` toward `backup`
pub fn td_blend(current: f64, backup: f64) -> f64 {
    current + LEARNING_RATE * DISCOUNT_FACTOR * (backup - current)
}

/// Assign `reward` to the final decision and sweep earlier plies.
///
/// # Errors
///
/// Returns [`Error::MissingRecord`] if the table holds no record for the
/// decision. Nothing is modified in that case.
pub fn apply_outcome(
    table: &mut ValueTable,
    decision: &Decision,
    reward: Reward,
) -> Result<BackupReport> {
    let terminal = table
        .record_mut(decision.ply, &decision.state, decision.action)
        .ok_or_else(|| Error::MissingRecord {
            ply: decision.ply.value(),
            state: decision.state.as_str().to_string(),
            action: decision.action.to_string(),
        })?;
    terminal.value = reward.value();

    let mut report = BackupReport {
        terminal_ply: decision.ply,
        plies_swept: Vec::new(),
        records_updated: 0,
    };

    let mut next = decision.ply;
    while let Some(ply) = next.checked_sub(2) {
        report.records_updated += sweep_ply(table, ply, next);
        report.plies_swept.push(ply);
        next = ply;
    }

    debug!(
        "assigned {:.1} at ply {} ({} {}), updated {} record(s) over {} plies",
        reward.value(),
        decision.ply,
        decision.state,
        decision.action,
        report.records_updated,
        report.plies_swept.len()
    );

    Ok(report)
}

/// Update every record at `ply` from the best values at `later`
fn sweep_ply(table: &mut ValueTable, ply: Ply, later: Ply) -> usize {
    let best = table.best_values(later);
    if best.is_empty() {
        return 0;
    }

    let mut updated = 0;
    for actions in table.bucket_mut(ply).values_mut() {
        for record in actions.values_mut() {
            let backup = record
                .continuations
                .iter()
                .filter_map(|state| best.get(state).copied())
                .reduce(f64::min);

            if let Some(backup) = backup {
                record.value = td_blend(record.value, backup);
                updated += 1;
            }
        }
    }
    updated
}
