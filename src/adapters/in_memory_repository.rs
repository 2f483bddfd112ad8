//! In-memory value table repository for testing.
//!
//! Stores the JSON encoding of each table under its path, so tests exercise
//! the same serialization as the file adapter without touching the disk.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, ports::ValueTableRepository, value_table::ValueTable};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use qtictactoe::adapters::InMemoryRepository;
/// use qtictactoe::ports::ValueTableRepository;
/// use qtictactoe::value_table::ValueTable;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&ValueTable::new(), Path::new("weights"))?;
/// let loaded = repo.load(Path::new("weights"))?;
/// assert!(loaded.is_empty());
/// # Ok::<(), qtictactoe::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    /// Number of stored tables
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Remove every stored table
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Store raw bytes at a path, e.g. to simulate a corrupt file
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage().insert(Self::key(path), bytes);
    }
}

impl ValueTableRepository for InMemoryRepository {
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(table).map_err(|e| Error::SerializationContext {
            operation: "serialize value table for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(Self::key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<ValueTable> {
        let storage = self.storage();

        let bytes = storage.get(&Self::key(path)).ok_or_else(|| Error::Io {
            operation: format!("load value table from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        let mut table: ValueTable =
            serde_json::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize value table from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        table.seed_buckets();
        table.validate()?;
        Ok(table)
    }

    fn exists(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tictactoe::BoardState, value_table::PolicyEngine};

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("weights");

        let mut table = ValueTable::new();
        PolicyEngine::new()
            .with_seed(1)
            .select_action(&mut table, &BoardState::new())
            .unwrap();

        assert_eq!(repo.count(), 0);
        assert!(!repo.exists(path));

        repo.save(&table, path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.exists(path));

        assert_eq!(repo.load(path).unwrap(), table);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).is_err());
    }

    #[test]
    fn test_load_corrupt_returns_error() {
        let repo = InMemoryRepository::new();
        let path = Path::new("corrupt");
        repo.insert_raw(path, b"{not json".to_vec());
        assert!(matches!(
            repo.load(path),
            Err(Error::SerializationContext { .. })
        ));
    }

    #[test]
    fn test_load_inconsistent_returns_error() {
        let repo = InMemoryRepository::new();
        let path = Path::new("occupied");
        repo.insert_raw(
            path,
            br#"{"1":{"X--------":{"ul":{"value":0.5,"continuations":[]}}}}"#.to_vec(),
        );
        assert!(matches!(
            repo.load(path),
            Err(Error::InconsistentTable { ply: 1, .. })
        ));
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        repo1.save(&ValueTable::new(), Path::new("shared")).unwrap();
        assert!(repo2.load(Path::new("shared")).is_ok());
        assert_eq!(repo2.count(), 1);

        repo2.clear();
        assert_eq!(repo1.count(), 0);
    }
}
