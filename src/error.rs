//! Error types for the qtictactoe crate

use thiserror::Error;

/// Main error type for the qtictactoe crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid player '{player}' (expected 'X' or 'O')")]
    InvalidPlayer { player: String },

    #[error("unknown cell '{name}' (expected one of ul, um, ur, cl, cm, cr, ll, lm, lr)")]
    UnknownCell { name: String },

    #[error("cell {cell} is already occupied")]
    CellOccupied { cell: String },

    #[error("game already over")]
    GameOver,

    #[error("no legal actions available in state '{state}'")]
    NoLegalActions { state: String },

    #[error("invalid serialized state '{input}': {reason}")]
    InvalidSerializedState { input: String, reason: String },

    #[error("ply {value} is out of range (must be 0-9)")]
    InvalidPly { value: usize },

    #[error("invalid sampling floor '{input}' (expected a finite number greater than 0)")]
    InvalidSamplingFloor { input: String },

    #[error("inconsistent value table at ply {ply}, state '{state}': {reason}")]
    InconsistentTable {
        ply: u8,
        state: String,
        reason: String,
    },

    #[error("no value record for action {action} in state '{state}' at ply {ply}")]
    MissingRecord {
        ply: u8,
        state: String,
        action: String,
    },

    #[error("no pending decision to assign an outcome to")]
    NoPendingDecision,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
