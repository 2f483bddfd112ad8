//! Learning session: owns the value table for the lifetime of one run.
//!
//! The table is loaded once when the session opens and saved once after
//! every completed game. All selection and credit assignment goes through
//! the session so the table has a single owner.

use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::Rng;

use super::config::EngineConfig;
use crate::{
    Result,
    error::Error,
    ports::ValueTableRepository,
    tictactoe::{BoardState, Cell, Player},
    value_table::{BackupReport, Decision, PolicyEngine, Reward, ValueTable, apply_outcome},
};

/// Where the session's table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// Read from the configured path
    Loaded,
    /// Nothing stored yet; started empty
    Fresh,
    /// Stored data could not be read; started empty
    Recovered { reason: String },
}

/// A value table together with the engine and storage that act on it.
pub struct Session {
    table: ValueTable,
    engine: PolicyEngine,
    repository: Box<dyn ValueTableRepository>,
    table_path: PathBuf,
    source: TableSource,
    games_completed: usize,
}

impl Session {
    /// Open a session using the repository matching the configured format.
    pub fn open(config: &EngineConfig) -> Self {
        Self::open_with(config, config.format.repository())
    }

    /// Open a session on an explicit repository.
    ///
    /// A missing table starts empty. An unreadable table also starts empty,
    /// with a warning; it will be overwritten by the next save.
    pub fn open_with(config: &EngineConfig, repository: Box<dyn ValueTableRepository>) -> Self {
        let path = config.table_path.clone();
        let (table, source) = if !repository.exists(&path) {
            info!("no table at {}, starting fresh", path.display());
            (ValueTable::new(), TableSource::Fresh)
        } else {
            match repository.load(&path) {
                Ok(table) => (table, TableSource::Loaded),
                Err(e) => {
                    warn!(
                        "could not read table at {}: {e}; starting from an empty table",
                        path.display()
                    );
                    (
                        ValueTable::new(),
                        TableSource::Recovered {
                            reason: e.to_string(),
                        },
                    )
                }
            }
        };

        let mut engine = PolicyEngine::new().with_sampling_floor(config.sampling_floor);
        if let Some(seed) = config.seed {
            engine = engine.with_seed(seed);
        }

        Self {
            table,
            engine,
            repository,
            table_path: path,
            source,
            games_completed: 0,
        }
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    /// Games finished (and saved) by this session
    pub fn games_completed(&self) -> usize {
        self.games_completed
    }

    /// Choose a move for `mover` on a board with real labels.
    ///
    /// The board is relabelled to the acting side's perspective before the
    /// table is consulted; the returned cell needs no translation.
    pub fn select_action(&mut self, state: &BoardState, mover: Player) -> Result<Cell> {
        let view = state.from_perspective(mover);
        self.engine.select_action(&mut self.table, &view)
    }

    pub fn has_won(&self, state: &BoardState, player: Player) -> bool {
        state.has_won(player)
    }

    pub fn is_draw(&self, state: &BoardState) -> bool {
        state.is_draw()
    }

    pub fn pending(&self) -> Option<&Decision> {
        self.engine.pending()
    }

    /// Forget any decision left over from an abandoned game
    pub fn reset_pending(&mut self) {
        self.engine.clear_pending();
    }

    /// Fair coin from the session RNG
    pub fn coin_flip(&mut self) -> bool {
        self.engine.rng_mut().random_bool(0.5)
    }

    /// Propagate a game's outcome from `decision` and save the table.
    ///
    /// # Errors
    ///
    /// Fails if the decision has no record or if saving fails. In the latter
    /// case the in-memory table is already updated but the game is not
    /// counted as completed.
    pub fn apply_outcome(&mut self, decision: &Decision, reward: Reward) -> Result<BackupReport> {
        let report = apply_outcome(&mut self.table, decision, reward)?;
        self.save()?;
        self.games_completed += 1;
        Ok(report)
    }

    /// Apply `reward` to the pending decision and save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPendingDecision`] if no move was selected since
    /// the last finished game.
    pub fn finish_game(&mut self, reward: Reward) -> Result<BackupReport> {
        let decision = self.engine.take_pending().ok_or(Error::NoPendingDecision)?;
        self.apply_outcome(&decision, reward)
    }

    /// Write the table to the configured location
    pub fn save(&self) -> Result<()> {
        self.repository.save(&self.table, &self.table_path)
    }
}
