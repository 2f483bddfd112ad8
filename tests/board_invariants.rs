//! Invariants over every reachable board

mod common;

use std::collections::HashSet;

use common::reachable_states;
use qtictactoe::{
    PolicyEngine, Player, ValueTable,
    tictactoe::{ACTING_PLAYER, is_draw},
};

#[test]
fn test_reachable_state_count() {
    assert_eq!(reachable_states().len(), 5478);
}

#[test]
fn test_at_most_one_winner() {
    for state in reachable_states() {
        assert!(
            !(state.has_won(Player::X) && state.has_won(Player::O)),
            "both players won on\n{state}"
        );
        if is_draw(&state) {
            assert_eq!(state.winner(), None);
            assert_eq!(state.empty_cells().len(), 0);
        }
    }
}

#[test]
fn test_serialization_is_injective() {
    let states = reachable_states();
    let keys: HashSet<String> = states
        .iter()
        .map(|state| state.serialize().into_string())
        .collect();
    assert_eq!(keys.len(), states.len());

    for state in &states {
        assert_eq!(state.serialize().to_board(), *state);
        assert_eq!(state.serialize().ply(), state.ply());
    }
}

#[test]
fn test_perspective_is_an_involution() {
    for state in reachable_states() {
        assert_eq!(state.from_perspective(ACTING_PLAYER), state);
        let flipped = state.from_perspective(Player::X);
        assert_eq!(flipped.swap_marks(), state);
        assert_eq!(flipped.has_won(Player::O), state.has_won(Player::X));
    }
}

#[test]
fn test_selection_only_returns_empty_cells() {
    let mut table = ValueTable::new();
    let mut engine = PolicyEngine::new().with_seed(2024);

    for state in reachable_states().into_iter().filter(|s| !s.is_terminal()) {
        let cell = engine
            .select_action(&mut table, &state)
            .expect("open board has a move");
        assert!(state.is_empty(cell), "{cell} taken on\n{state}");

        let stored = table
            .actions(state.ply(), &state.serialize())
            .expect("first visit stores actions");
        assert_eq!(stored.len(), state.empty_cells().len());
    }
}
