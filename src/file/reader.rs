//! Store file reader
//!
//! Loads every record of a store file into an ordered map.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{MementoError, Result};

/// Reads store files
pub struct RecordReader;

/// Statistics from a load
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// Records that produced an entry
    pub records_loaded: u64,

    /// Records skipped for having fewer than two fields
    pub records_skipped: u64,

    /// Records that overwrote an earlier record with the same key
    pub duplicates: u64,
}

impl RecordReader {
    /// Load the store file at `path`, creating an empty one if it is absent.
    ///
    /// The parent directory is never created; a missing directory surfaces as
    /// [`MementoError::Open`].
    pub fn load(path: &Path) -> Result<(BTreeMap<String, String>, LoadStats)> {
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .open(path)
                    .map_err(|source| MementoError::Open {
                        path: path.to_path_buf(),
                        source,
                    })?;
                tracing::debug!(path = %path.display(), "created empty store file");
                Vec::new()
            }
            Err(source) => {
                return Err(MementoError::Open {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(path, &raw)
    }

    /// Parse raw file contents. `path` is only used for error reporting.
    pub fn parse(path: &Path, raw: &[u8]) -> Result<(BTreeMap<String, String>, LoadStats)> {
        // The csv parser is lenient about quoting and would read an unclosed
        // field through to EOF, swallowing every record after it.
        if let Err(reason) = check_quoting(raw) {
            return Err(MementoError::Parse {
                path: path.to_path_buf(),
                reason,
            });
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(raw);

        let mut values = BTreeMap::new();
        let mut stats = LoadStats::default();

        for result in reader.records() {
            let record = result.map_err(|e| MementoError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

            if record.len() < 2 {
                tracing::trace!(
                    line = record.position().map(|p| p.line()),
                    "skipping record with fewer than two fields"
                );
                stats.records_skipped += 1;
                continue;
            }

            if values
                .insert(record[0].to_string(), record[1].to_string())
                .is_some()
            {
                stats.duplicates += 1;
            }
            stats.records_loaded += 1;
        }

        Ok((values, stats))
    }
}

/// Quote state while scanning a field
#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    /// At the start of a field
    FieldStart,
    /// Inside a field that did not open with a quote
    Unquoted,
    /// Inside a quoted field
    Quoted,
    /// Just saw a quote inside a quoted field: either an escape or the close
    QuoteSeen,
}

/// Strict RFC 4180 quoting check over the raw bytes
///
/// Rejects a quote inside an unquoted field, anything but a delimiter or line
/// end after a closing quote, and EOF inside a quoted field.
fn check_quoting(raw: &[u8]) -> std::result::Result<(), String> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1u64;
    let mut opened_at = 1u64;

    for &b in raw {
        if b == b'\n' {
            line += 1;
        }

        state = match (state, b) {
            (QuoteState::Quoted, b'"') => QuoteState::QuoteSeen,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteSeen, b'"') => QuoteState::Quoted,
            (_, b',' | b'\r' | b'\n') => QuoteState::FieldStart,
            (QuoteState::FieldStart, b'"') => {
                opened_at = line;
                QuoteState::Quoted
            }
            (QuoteState::Unquoted, b'"') => {
                return Err(format!("line {}: bare quote in unquoted field", line));
            }
            (QuoteState::QuoteSeen, _) => {
                return Err(format!("line {}: unexpected character after closing quote", line));
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
        };
    }

    if state == QuoteState::Quoted {
        return Err(format!("line {}: unterminated quoted field", opened_at));
    }
    Ok(())
}
