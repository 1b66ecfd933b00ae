//! Configuration for Memento
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{MementoError, Result};

/// Configuration for a single store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Location
    // -------------------------------------------------------------------------
    /// Store name; the backing file is `{dir}/{name}.csv`
    pub name: String,

    /// Directory holding the backing file. Must already exist.
    pub dir: PathBuf,

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------
    /// How the mapping is written back on every mutation
    pub write_strategy: WriteStrategy,

    /// fsync the file before a setter returns
    pub sync_on_write: bool,
}

/// Write strategy: how a setter replaces the file contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteStrategy {
    /// Truncate the existing file and rewrite it in place.
    /// A failure partway leaves the file in an undefined state.
    #[default]
    Truncate,

    /// Write a temporary file next to the store and rename it over the
    /// store file. A failure leaves the previous contents intact.
    AtomicRename,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "user_prefs".to_string(),
            dir: PathBuf::from("./memento"),
            write_strategy: WriteStrategy::Truncate,
            sync_on_write: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Path of the backing file: `{dir}/{name}.csv`
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}", self.name, crate::file::EXTENSION))
    }

    /// Reject names that cannot be used as a single file stem
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MementoError::Config("store name must not be empty".into()));
        }
        if self.name.contains(['/', '\\']) {
            return Err(MementoError::Config(format!(
                "store name {:?} must not contain a path separator",
                self.name
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the directory holding the store file
    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dir = path.into();
        self
    }

    /// Set the write strategy
    pub fn write_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.config.write_strategy = strategy;
        self
    }

    /// fsync after every write
    pub fn sync_on_write(mut self, sync: bool) -> Self {
        self.config.sync_on_write = sync;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
