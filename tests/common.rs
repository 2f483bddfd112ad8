//! Common test utilities for the qtictactoe test suite.

#![allow(dead_code)]

use std::collections::HashSet;

use qtictactoe::{BoardState, Player, SerializedState};

/// Every board reachable by alternating legal play with X moving first,
/// stopping at wins and full boards.
pub fn reachable_states() -> Vec<BoardState> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![(BoardState::new(), Player::X)];

    while let Some((state, to_move)) = stack.pop() {
        if !seen.insert(state) {
            continue;
        }
        order.push(state);
        if state.is_terminal() {
            continue;
        }
        for cell in state.empty_cells() {
            let next = state
                .place(cell, to_move)
                .expect("empty cell on open board");
            stack.push((next, to_move.opponent()));
        }
    }
    order
}

pub fn board(s: &str) -> BoardState {
    SerializedState::parse(s)
        .expect("valid serialized state")
        .to_board()
}
