//! Configuration for opening a learning session.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    adapters::{JsonRepository, MsgPackRepository},
    ports::ValueTableRepository,
    types::SamplingFloor,
};

/// Default location of the persisted table
pub const DEFAULT_TABLE_PATH: &str = "model_weights.json";

/// On-disk encoding of the value table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    /// Nested JSON maps keyed by ply, state and cell
    #[default]
    Json,
    /// Same structure as compact MessagePack
    #[value(name = "msgpack")]
    MsgPack,
}

impl TableFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("msgpack") | Some("mp") => TableFormat::MsgPack,
            _ => TableFormat::Json,
        }
    }

    /// Repository adapter for this format
    pub fn repository(self) -> Box<dyn ValueTableRepository> {
        match self {
            TableFormat::Json => Box::new(JsonRepository::new()),
            TableFormat::MsgPack => Box::new(MsgPackRepository::new()),
        }
    }
}

/// Configuration for a [`Session`](super::Session).
///
/// # Examples
///
/// ```
/// use qtictactoe::app::{EngineConfig, TableFormat};
/// use qtictactoe::types::SamplingFloor;
///
/// let config = EngineConfig::new("weights.msgpack")
///     .with_seed(42)
///     .with_sampling_floor(SamplingFloor::new(0.01)?);
/// assert_eq!(config.format, TableFormat::MsgPack);
/// # Ok::<(), qtictactoe::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Where the table is loaded from and saved to
    pub table_path: PathBuf,
    /// Encoding of the table file
    pub format: TableFormat,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Smallest sampling weight an action keeps
    pub sampling_floor: SamplingFloor,
}

impl EngineConfig {
    /// Create a configuration for the given table file.
    ///
    /// The format is guessed from the extension; no seed; default floor.
    pub fn new(table_path: impl Into<PathBuf>) -> Self {
        let table_path = table_path.into();
        Self {
            format: TableFormat::from_path(&table_path),
            table_path,
            seed: None,
            sampling_floor: SamplingFloor::DEFAULT,
        }
    }

    pub fn with_format(mut self, format: TableFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sampling_floor(mut self, floor: SamplingFloor) -> Self {
        self.sampling_floor = floor;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_PATH)
    }
}
