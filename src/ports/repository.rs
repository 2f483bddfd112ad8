//! Repository port for value table persistence.

use std::path::Path;

use crate::{Result, value_table::ValueTable};

/// Port for persisting and loading value tables.
///
/// Implementations must return a table with all ten ply buckets present,
/// even when the stored data omits some of them.
///
/// # Examples
///
/// ```no_run
/// use qtictactoe::adapters::JsonRepository;
/// use qtictactoe::ports::ValueTableRepository;
/// use qtictactoe::value_table::ValueTable;
/// use std::path::Path;
///
/// fn checkpoint<R: ValueTableRepository>(
///     repo: &R,
///     table: &ValueTable,
///     path: &Path,
/// ) -> qtictactoe::Result<()> {
///     repo.save(table, path)
/// }
/// ```
pub trait ValueTableRepository {
    /// Save a table, replacing whatever was stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()>;

    /// Load a table.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path`, the stored data
    /// cannot be decoded, or the decoded table fails
    /// [`ValueTable::validate`].
    fn load(&self, path: &Path) -> Result<ValueTable>;

    /// Whether anything is stored at `path`
    fn exists(&self, path: &Path) -> bool;
}
