//! Tic-tac-toe player that learns a turn-indexed action-value table
//!
//! This crate provides:
//! - Board representation, win/draw detection and state serialization
//! - A value table keyed by ply, serialized state and cell
//! - Weighted action selection and worst-reply credit assignment
//! - JSON and MessagePack persistence of the table across sessions
//! - Interactive and self-play sessions behind a small CLI

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod ports;
pub mod tictactoe;
pub mod types;
pub mod utils;
pub mod value_table;

pub use error::{Error, Result};
pub use tictactoe::{BoardState, Cell, Game, GameOutcome, Mark, Player};
pub use types::{Ply, SerializedState};
pub use value_table::{Decision, PolicyEngine, Reward, ValueRecord, ValueTable, apply_outcome};
