//! CLI infrastructure for the `qtictactoe` binary
//!
//! Commands play against a human, train by self-play, and inspect the
//! persisted value table.

pub mod commands;
pub mod config;
pub mod output;
