//! CLI subcommands

pub mod inspect;
pub mod play;
pub mod self_play;
pub mod stats;
