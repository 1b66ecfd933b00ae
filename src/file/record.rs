//! Record definition
//!
//! A single `key,value` row of the store file.

use serde::Serialize;

/// One row as written by [`RecordWriter`](super::RecordWriter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Record<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(key: &'a str, value: &'a str) -> Self {
        Self { key, value }
    }
}
