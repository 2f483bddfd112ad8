//! Per-action value record

use serde::{Deserialize, Serialize};

use crate::{
    tictactoe::{ACTING_PLAYER, BoardState, Cell},
    types::SerializedState,
};

/// Estimated value of one action plus the states it can lead to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRecord {
    /// How favourable the action is for the acting side
    pub value: f64,
    /// States two plies later: the action followed by each single reply.
    /// Fixed at creation.
    pub continuations: Vec<SerializedState>,
}

impl ValueRecord {
    pub fn new(value: f64, continuations: Vec<SerializedState>) -> Self {
        Self {
            value,
            continuations,
        }
    }

    /// Build the record for `action` taken by the acting side from `state`.
    pub fn for_action(state: &BoardState, action: Cell, value: f64) -> Self {
        Self::new(value, continuations(state, action))
    }
}

/// Every state reachable by playing `action` and then letting the opponent
/// fill one of the remaining empty cells, in canonical cell order.
///
/// Empty when `action` fills the last free cell.
pub fn continuations(state: &BoardState, action: Cell) -> Vec<SerializedState> {
    let after = state.with_mark(action, ACTING_PLAYER.to_mark());
    let reply = ACTING_PLAYER.opponent().to_mark();
    after
        .empty_cells()
        .into_iter()
        .map(|cell| after.with_mark(cell, reply).serialize())
        .collect()
}
