//! Snapshot persistence: the whole table registry as one JSON document.
//!
//! The document is an object keyed by table name; each table carries its
//! ordered column descriptors and its ordered rows. Indexes are not
//! persisted, they are rebuilt from the rows on load.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::storage::Table;
use crate::types::{Column, Row};

#[derive(Serialize)]
struct TableRecordRef<'a> {
    columns: &'a [Column],
    rows: &'a [Row],
}

#[derive(Deserialize)]
struct TableRecord {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

/// Writes and reads the snapshot file.
///
/// Save and load are serialized against each other by this layer's own
/// lock; callers already hold the database lock when they get here.
pub struct Persistence {
    path: PathBuf,
    lock: RwLock<()>,
}

impl Persistence {
    pub fn new(path: impl Into<PathBuf>) -> Persistence {
        Persistence {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the snapshot with the full registry state.
    ///
    /// The document goes to a temporary file in the target directory and is
    /// renamed into place, so a failed write leaves the previous snapshot
    /// intact.
    pub fn save(&self, tables: &HashMap<String, Table>) -> Result<()> {
        let _guard = self.lock.write();

        let document: HashMap<&str, TableRecordRef<'_>> = tables
            .iter()
            .map(|(name, table)| {
                (
                    name.as_str(),
                    TableRecordRef {
                        columns: &table.columns,
                        rows: &table.rows,
                    },
                )
            })
            .collect();

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(file.as_file(), &document)?;
        file.persist(&self.path)
            .map_err(|err| Error::Io(err.to_string()))?;
        tracing::debug!(
            path = %self.path.display(),
            tables = document.len(),
            "snapshot written"
        );
        Ok(())
    }

    /// Reads the snapshot into a fresh registry, rebuilding each table's
    /// indexes by a full scan of its rows. A missing file is an empty
    /// database, not an error.
    pub fn load(&self) -> Result<HashMap<String, Table>> {
        let _guard = self.lock.read();

        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let file = File::open(&self.path)?;
        let document: HashMap<String, TableRecord> = serde_json::from_reader(BufReader::new(file))?;

        let tables: HashMap<String, Table> = document
            .into_iter()
            .map(|(name, record)| {
                let table = Table::from_snapshot(name.clone(), record.columns, record.rows);
                (name, table)
            })
            .collect();
        tracing::debug!(
            path = %self.path.display(),
            tables = tables.len(),
            "snapshot loaded"
        );
        Ok(tables)
    }
}
