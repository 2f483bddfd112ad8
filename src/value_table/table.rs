//! Turn-indexed value table

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    tictactoe::{BoardState, Cell},
    types::{Ply, SerializedState},
    value_table::record::ValueRecord,
};

/// Action records stored for one state
pub type ActionValues = BTreeMap<Cell, ValueRecord>;

/// All states seen at one ply
pub type StateBucket = BTreeMap<SerializedState, ActionValues>;

/// Value table mapping ply → serialized state → action → record
///
/// Entries are only ever added or value-updated, never removed. Serializes
/// as the nested map itself, so the JSON layout is
/// `{"0": {"---------": {"ul": {"value": .., "continuations": [..]}}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTable {
    buckets: BTreeMap<Ply, StateBucket>,
}

impl ValueTable {
    /// Create an empty table with all ten ply buckets present
    pub fn new() -> Self {
        let mut table = Self {
            buckets: BTreeMap::new(),
        };
        table.seed_buckets();
        table
    }

    /// Insert any missing ply bucket (used after loading partial tables)
    pub fn seed_buckets(&mut self) {
        for ply in Ply::all() {
            self.buckets.entry(ply).or_default();
        }
    }

    pub fn bucket(&self, ply: Ply) -> Option<&StateBucket> {
        self.buckets.get(&ply)
    }

    pub(crate) fn bucket_mut(&mut self, ply: Ply) -> &mut StateBucket {
        self.buckets.entry(ply).or_default()
    }

    pub fn actions(&self, ply: Ply, state: &SerializedState) -> Option<&ActionValues> {
        self.buckets.get(&ply)?.get(state)
    }

    pub fn contains(&self, ply: Ply, state: &SerializedState) -> bool {
        self.actions(ply, state).is_some()
    }

    pub fn record(&self, ply: Ply, state: &SerializedState, action: Cell) -> Option<&ValueRecord> {
        self.actions(ply, state)?.get(&action)
    }

    pub fn record_mut(
        &mut self,
        ply: Ply,
        state: &SerializedState,
        action: Cell,
    ) -> Option<&mut ValueRecord> {
        self.buckets.get_mut(&ply)?.get_mut(state)?.get_mut(&action)
    }

    /// Return the actions for `(ply, state)`, creating them with `init` on
    /// the first visit. Existing entries are returned untouched.
    pub fn get_or_insert_with<F>(
        &mut self,
        ply: Ply,
        state: SerializedState,
        init: F,
    ) -> &ActionValues
    where
        F: FnOnce() -> ActionValues,
    {
        self.bucket_mut(ply).entry(state).or_insert_with(init)
    }

    /// Highest action value recorded for a state, `None` if unseen
    pub fn best_value(&self, ply: Ply, state: &SerializedState) -> Option<f64> {
        self.actions(ply, state).and_then(max_value)
    }

    /// Highest action value of every state in a bucket that has actions
    pub fn best_values(&self, ply: Ply) -> HashMap<SerializedState, f64> {
        self.bucket(ply)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter_map(|(state, actions)| Some((state.clone(), max_value(actions)?)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Actions stored for a board, best first
    pub fn ranked_actions(&self, state: &BoardState) -> Vec<(Cell, f64)> {
        let mut ranked: Vec<(Cell, f64)> = self
            .actions(state.ply(), &state.serialize())
            .map(|actions| {
                actions
                    .iter()
                    .map(|(&cell, record)| (cell, record.value))
                    .collect()
            })
            .unwrap_or_default();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// Total number of states across all plies
    pub fn state_count(&self) -> usize {
        self.buckets.values().map(BTreeMap::len).sum()
    }

    /// Total number of action records across all plies
    pub fn record_count(&self) -> usize {
        self.buckets
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.state_count() == 0
    }

    /// Check that every entry could have been produced by play.
    ///
    /// Each state must sit in the bucket matching its occupied-cell count
    /// and every stored action must name an empty cell of that state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentTable`] for the first offending entry.
    pub fn validate(&self) -> Result<()> {
        for (&ply, bucket) in &self.buckets {
            for (state, actions) in bucket {
                let inconsistent = |reason: String| Error::InconsistentTable {
                    ply: ply.value(),
                    state: state.as_str().to_string(),
                    reason,
                };

                if state.ply() != ply {
                    return Err(inconsistent(format!(
                        "state has {} occupied cells",
                        state.ply()
                    )));
                }

                let board = state.to_board();
                if let Some(cell) = actions.keys().find(|&&cell| !board.is_empty(cell)) {
                    return Err(inconsistent(format!("action {cell} is already occupied")));
                }
            }
        }
        Ok(())
    }

    /// Summary per ply
    pub fn stats(&self) -> TableStats {
        let per_ply = self
            .buckets
            .iter()
            .map(|(&ply, bucket)| {
                let values: Vec<f64> = bucket
                    .values()
                    .flat_map(BTreeMap::values)
                    .map(|record| record.value)
                    .collect();
                let mean_value = if values.is_empty() {
                    None
                } else {
                    Some(values.iter().sum::<f64>() / values.len() as f64)
                };
                PlyStats {
                    ply,
                    states: bucket.len(),
                    records: values.len(),
                    mean_value,
                }
            })
            .collect();
        TableStats { per_ply }
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::new()
    }
}

fn max_value(actions: &ActionValues) -> Option<f64> {
    actions
        .values()
        .map(|record| record.value)
        .reduce(f64::max)
}

/// Counts for one ply bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlyStats {
    pub ply: Ply,
    pub states: usize,
    pub records: usize,
    pub mean_value: Option<f64>,
}

/// Counts for every ply bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStats {
    pub per_ply: Vec<PlyStats>,
}

impl TableStats {
    pub fn total_states(&self) -> usize {
        self.per_ply.iter().map(|p| p.states).sum()
    }

    pub fn total_records(&self) -> usize {
        self.per_ply.iter().map(|p| p.records).sum()
    }
}
