//! Store File Module
//!
//! Loads and persists the flat key/value mapping as CSV.
//!
//! ## Responsibilities
//! - Create the store file on first open
//! - Parse records, skipping rows with fewer than two fields
//! - Rewrite the whole file on every mutation
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────┐
//! │ key,value                            │  one record per line
//! │ isFirstRun,false                     │  no header row
//! │ volume,7.5E-1                        │  standard CSV quoting
//! │ "greeting, long","say ""hi"""        │  for , " CR LF
//! └──────────────────────────────────────┘
//! ```
//! Fields past the second are ignored on load. When a key appears more than
//! once, the last record wins.

mod reader;
mod record;
mod writer;

pub use reader::{LoadStats, RecordReader};
pub use record::Record;
pub use writer::RecordWriter;

/// Fixed extension of every store file
pub const EXTENSION: &str = "csv";
