//! Store Module
//!
//! The preference store: an in-memory mapping backed by one CSV file.
//!
//! ## Responsibilities
//! - Load the store file on open (creating it if absent)
//! - Serve typed reads from memory with default fallback
//! - Persist the whole mapping on every mutation

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::file::{RecordReader, RecordWriter};
use crate::value::Preference;

/// A named key/value preference store
///
/// ## Access Model
///
/// - **Reads** (`get_*`): pure in-memory lookups, never touch the disk
/// - **Writes** (`set_*`, `remove`): update memory first, then rewrite the
///   whole backing file before returning
///
/// A failed write still leaves the new value in memory, so memory and disk
/// can diverge until the next successful write.
///
/// No file handle is held between calls and nothing guards against a second
/// `Store` on the same file. Share one instance instead.
#[derive(Debug)]
pub struct Store {
    /// Store configuration
    config: Config,

    /// Key → encoded value, ordered so the file layout is deterministic
    values: BTreeMap<String, String>,

    /// Owns the `{dir}/{name}.csv` path
    writer: RecordWriter,
}

impl Store {
    /// Open the store `name` in `dir` with default settings
    ///
    /// Creates `{dir}/{name}.csv` if it does not exist yet. `dir` itself must
    /// already exist.
    pub fn open(name: impl Into<String>, dir: impl Into<PathBuf>) -> Result<Self> {
        let config = Config::builder().name(name).dir(dir).build();
        Self::open_with_config(config)
    }

    /// Open a store from a full configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let path = config.file_path();
        let (values, stats) = RecordReader::load(&path)?;

        tracing::debug!(
            path = %path.display(),
            loaded = stats.records_loaded,
            skipped = stats.records_skipped,
            duplicates = stats.duplicates,
            "opened store"
        );

        let writer = RecordWriter::new(path, config.write_strategy, config.sync_on_write);

        Ok(Self {
            config,
            values,
            writer,
        })
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Decode the value stored under `key`, or return `default`
    ///
    /// Returns `default` when the key is missing *or* when the stored text
    /// does not decode as `T`. Decode failures are never reported.
    pub fn get<T: Preference>(&self, key: &str, default: T) -> T {
        self.values
            .get(key)
            .and_then(|raw| T::decode(raw))
            .unwrap_or(default)
    }

    /// `true` iff the stored value is exactly `"true"`; `default` if missing
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key, default)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key, default)
    }

    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.get(key, default)
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get_raw(key).unwrap_or(default).to_string()
    }

    /// The encoded value as stored, without decoding
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Store `value` under `key` and persist the whole mapping
    pub fn set<T: Preference>(&mut self, key: impl Into<String>, value: T) -> Result<()> {
        self.values.insert(key.into(), value.encode());
        self.persist()
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> Result<()> {
        self.set(key, value)
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i64) -> Result<()> {
        self.set(key, value)
    }

    pub fn set_float(&mut self, key: impl Into<String>, value: f64) -> Result<()> {
        self.set(key, value)
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.set(key, value.into())
    }

    /// Remove `key`. Returns whether it was present.
    ///
    /// The file is only rewritten when something was actually removed.
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        if self.values.remove(key).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        if let Err(e) = self.writer.persist(&self.values) {
            tracing::debug!(error = %e, "store write failed; memory and disk diverge");
            return Err(e);
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(key, encoded value)` pairs in key order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.values.iter(),
        }
    }
}

/// Iterator over a store's entries
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
