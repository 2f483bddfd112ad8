//! JSON implementation of the value table repository.
//!
//! Produces the nested `{"<ply>": {"<state>": {"<cell>": {..}}}}` layout
//! that other tools can read directly.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{Result, error::Error, ports::ValueTableRepository, value_table::ValueTable};

/// JSON-file value table repository.
///
/// # Examples
///
/// ```no_run
/// use qtictactoe::adapters::JsonRepository;
/// use qtictactoe::ports::ValueTableRepository;
/// use qtictactoe::value_table::ValueTable;
/// use std::path::Path;
///
/// let repo = JsonRepository::new();
/// repo.save(&ValueTable::new(), Path::new("model_weights.json"))?;
/// let loaded = repo.load(Path::new("model_weights.json"))?;
/// # Ok::<(), qtictactoe::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository {
    pretty: bool,
}

impl JsonRepository {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Indent the output for humans
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl ValueTableRepository for JsonRepository {
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut writer, table)
        } else {
            serde_json::to_writer(&mut writer, table)
        };
        written.map_err(|e| Error::SerializationContext {
            operation: "serialize value table to JSON".to_string(),
            message: e.to_string(),
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

        let mut table: ValueTable =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                Error::SerializationContext {
                    operation: "deserialize value table from JSON".to_string(),
                    message: e.to_string(),
                }
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
