//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{ACTING_PLAYER, BoardState, Cell, Mark, Player};
pub use game::{Game, GameOutcome, Move, has_won, has_won_str, is_draw};
pub use lines::{LineAnalyzer, WINNING_LINES};
