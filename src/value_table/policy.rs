//! Policy engine: probabilistic action selection from the value table
//!
//! Boards handed to the engine must already be relabelled so the acting
//! side plays [`ACTING_PLAYER`](crate::tictactoe::ACTING_PLAYER). The first
//! visit to a `(ply, state)` pair creates one record per legal action with
//! a uniform value; later visits only read.

use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    tictactoe::{BoardState, Cell},
    types::{Ply, SamplingFloor, SerializedState},
    utils::sample_action,
    value_table::{
        record::ValueRecord,
        table::{ActionValues, ValueTable},
    },
};

/// A choice made by the engine, waiting for the game's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub ply: Ply,
    pub state: SerializedState,
    pub action: Cell,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Selects actions by sampling stored values as weights.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    rng: StdRng,
    sampling_floor: SamplingFloor,
    pending: Option<Decision>,
}

impl PolicyEngine {
    pub fn new() -> Self {
        Self {
            rng: build_rng(None),
            sampling_floor: SamplingFloor::DEFAULT,
            pending: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_sampling_floor(mut self, floor: SamplingFloor) -> Self {
        self.sampling_floor = floor;
        self
    }

    pub fn sampling_floor(&self) -> SamplingFloor {
        self.sampling_floor
    }

    /// RNG shared with the session (coin flips for who starts)
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Choose an action for `state` and remember it as the pending decision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if the board already has a winner and
    /// [`Error::NoLegalActions`] if it is full. The table is not touched in
    /// either case.
    pub fn select_action(&mut self, table: &mut ValueTable, state: &BoardState) -> Result<Cell> {
        let legal = state.empty_cells();
        if legal.is_empty() {
            return Err(Error::NoLegalActions {
                state: state.serialize().into_string(),
            });
        }
        if state.winner().is_some() {
            return Err(Error::GameOver);
        }

        let ply = state.ply();
        let key = state.serialize();
        let actions = table.get_or_insert_with(ply, key.clone(), || initial_actions(state, &legal));

        let count = actions.len();
        let action = sample_action(&mut self.rng, actions, self.sampling_floor).ok_or_else(|| {
            Error::NoLegalActions {
                state: key.as_str().to_string(),
            }
        })?;

        debug!("ply {ply} state {key}: chose {action} from {count} action(s)");

        self.pending = Some(Decision {
            ply,
            state: key,
            action,
        });
        Ok(action)
    }

    pub fn pending(&self) -> Option<&Decision> {
        self.pending.as_ref()
    }

    pub fn take_pending(&mut self) -> Option<Decision> {
        self.pending.take()
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform records for every legal action of a first-visit state
fn initial_actions(state: &BoardState, legal: &[Cell]) -> ActionValues {
    let uniform = 1.0 / legal.len() as f64;
    legal
        .iter()
        .map(|&cell| (cell, ValueRecord::for_action(state, cell, uniform)))
        .collect()
}
