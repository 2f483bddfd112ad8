//! Turn-indexed action-value learning
//!
//! The table maps `ply → serialized state → action → record`. Records are
//! created by the [`PolicyEngine`] on the first visit to a state, with every
//! legal action at `1 / |legal actions|`, and only ever moved afterwards by
//! [`apply_outcome`] once a game is over.
//!
//! ## Usage Example
//!
//! ```
//! use qtictactoe::tictactoe::BoardState;
//! use qtictactoe::value_table::{PolicyEngine, Reward, ValueTable, apply_outcome};
//!
//! let mut table = ValueTable::new();
//! let mut engine = PolicyEngine::new().with_seed(7);
//!
//! let action = engine.select_action(&mut table, &BoardState::new())?;
//! let decision = engine.take_pending().expect("decision was just made");
//! assert_eq!(decision.action, action);
//!
//! apply_outcome(&mut table, &decision, Reward::Draw)?;
//! assert_eq!(table.record(decision.ply, &decision.state, action).unwrap().value, 0.5);
//! # Ok::<(), qtictactoe::Error>(())
//! ```

pub mod backup;
pub mod policy;
pub mod record;
pub mod table;

pub use backup::{
    BackupReport, DISCOUNT_FACTOR, LEARNING_RATE, Reward, apply_outcome, td_blend,
};
pub use policy::{Decision, PolicyEngine};
pub use record::{ValueRecord, continuations};
pub use table::{ActionValues, PlyStats, StateBucket, TableStats, ValueTable};
