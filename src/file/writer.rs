//! Store file writer
//!
//! Replaces the whole store file with the current mapping.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tempfile::NamedTempFile;

use crate::config::WriteStrategy;
use crate::error::{MementoError, Result};

use super::Record;

/// Writes the mapping to a store file
#[derive(Debug, Clone)]
pub struct RecordWriter {
    path: PathBuf,
    strategy: WriteStrategy,
    sync: bool,
}

impl RecordWriter {
    pub fn new(path: impl Into<PathBuf>, strategy: WriteStrategy, sync: bool) -> Self {
        Self {
            path: path.into(),
            strategy,
            sync,
        }
    }

    /// Overwrite the store file with one record per entry, in key order
    pub fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let outcome = match self.strategy {
            WriteStrategy::Truncate => self.persist_truncate(values),
            WriteStrategy::AtomicRename => self.persist_atomic(values),
        };

        outcome.map_err(|source| MementoError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::trace!(
            path = %self.path.display(),
            entries = values.len(),
            strategy = ?self.strategy,
            "persisted store"
        );
        Ok(())
    }

    /// Rewrite in place. The file is not re-created if it has been removed.
    fn persist_truncate(&self, values: &BTreeMap<String, String>) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        write_records(&mut file, values)?;
        self.sync_file(&file)
    }

    /// Write a sibling temp file, then rename it over the store file
    fn persist_atomic(&self, values: &BTreeMap<String, String>) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        write_records(tmp.as_file_mut(), values)?;
        self.sync_file(tmp.as_file())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn sync_file(&self, file: &File) -> io::Result<()> {
        if self.sync {
            file.sync_all()?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_records<W: Write>(out: W, values: &BTreeMap<String, String>) -> io::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);

    for (key, value) in values {
        writer.serialize(Record::new(key, value))?;
    }

    writer.flush()
}
