//! MessagePack implementation of the value table repository.
//!
//! Same structure as the JSON adapter in rmp_serde's compact binary form.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{Result, error::Error, ports::ValueTableRepository, value_table::ValueTable};

/// MessagePack-based value table repository.
///
/// # Examples
///
/// ```no_run
/// use qtictactoe::adapters::MsgPackRepository;
/// use qtictactoe::ports::ValueTableRepository;
/// use qtictactoe::value_table::ValueTable;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// repo.save(&ValueTable::new(), Path::new("weights.msgpack"))?;
/// let loaded = repo.load(Path::new("weights.msgpack"))?;
/// # Ok::<(), qtictactoe::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ValueTableRepository for MsgPackRepository {
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, table).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize value table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })?;

        info!(
            "saved {} state(s) to {}",
            table.state_count(),
            path.display()
        );
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<ValueTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let mut table: ValueTable = rmp_serde::decode::from_read(BufReader::new(file))
            .map_err(|e| Error::SerializationContext {
                operation: "deserialize value table from MessagePack".to_string(),
                message: e.to_string(),
            })?;
        table.seed_buckets();
        table.validate()?;

        info!(
            "loaded {} state(s) from {}",
            table.state_count(),
            path.display()
        );
        Ok(table)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        tictactoe::{BoardState, Cell},
        types::{Ply, SerializedState},
        value_table::{PolicyEngine, Reward, ValueRecord, apply_outcome},
    };

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("weights.msgpack");

        let mut table = ValueTable::new();
        let mut engine = PolicyEngine::new().with_seed(5);
        engine.select_action(&mut table, &BoardState::new()).unwrap();
        let decision = engine.take_pending().unwrap();
        apply_outcome(&mut table, &decision, Reward::Win).unwrap();

        let repo = MsgPackRepository::new();
        repo.save(&table, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_garbage_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("garbage.msgpack");
        std::fs::write(&file_path, b"\xc1\xc1\xc1").unwrap();

        let result = MsgPackRepository::new().load(&file_path);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }

    #[test]
    fn test_load_rejects_occupied_action() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("occupied.msgpack");

        let key = SerializedState::parse("-X-------").unwrap();
        let mut table = ValueTable::new();
        table.get_or_insert_with(Ply::new(1).unwrap(), key.clone(), || {
            [(Cell::UpperMiddle, ValueRecord::new(0.5, Vec::new()))]
                .into_iter()
                .collect()
        });

        let repo = MsgPackRepository::new();
        repo.save(&table, &file_path).expect("Failed to save");
        assert!(matches!(
            repo.load(&file_path),
            Err(Error::InconsistentTable { .. })
        ));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackRepository::new();
        let result = repo.save(
            &ValueTable::new(),
            Path::new("/invalid_dir_12345/weights.msgpack"),
        );
        assert!(result.is_err());
    }
}
