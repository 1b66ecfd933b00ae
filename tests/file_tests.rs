//! Tests for the store file format
//!
//! These tests verify:
//! - RecordReader: creation of missing files, skipping, duplicates, errors
//! - RecordWriter: layout, quoting, truncate vs. atomic rename

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use memento::config::WriteStrategy;
use memento::file::{LoadStats, RecordReader, RecordWriter};
use memento::MementoError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.csv");
    (temp_dir, path)
}

fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn parse(raw: &str) -> (BTreeMap<String, String>, LoadStats) {
    RecordReader::parse(Path::new("test.csv"), raw.as_bytes()).unwrap()
}

// =============================================================================
// RecordReader Tests
// =============================================================================

#[test]
fn test_load_creates_missing_file() {
    let (_temp, path) = setup_temp_file();

    let (values, stats) = RecordReader::load(&path).unwrap();

    assert!(values.is_empty());
    assert_eq!(stats, LoadStats::default());
    assert!(path.exists());
    assert_eq!(fs::read(&path).unwrap().len(), 0);
}

#[test]
fn test_load_does_not_modify_existing_file() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "b,2\na,1\n").unwrap();

    RecordReader::load(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "b,2\na,1\n");
}

#[test]
fn test_load_missing_directory_is_open_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope").join("test.csv");

    let result = RecordReader::load(&path);

    match result {
        Err(MementoError::Open { path: err_path, .. }) => assert_eq!(err_path, path),
        other => panic!("expected open error, got {:?}", other),
    }
}

#[test]
fn test_parse_stats() {
    let (values, stats) = parse("a,1\nskip\nb,2\na,3\n");

    assert_eq!(values, map(&[("a", "3"), ("b", "2")]));
    assert_eq!(stats.records_loaded, 3);
    assert_eq!(stats.records_skipped, 1);
    assert_eq!(stats.duplicates, 1);
}

#[test]
fn test_parse_ignores_extra_fields() {
    let (values, _) = parse("k,v,extra,more\n");

    assert_eq!(values, map(&[("k", "v")]));
}

#[test]
fn test_parse_quoted_fields() {
    let (values, _) = parse("\"a,b\",\"say \"\"hi\"\"\"\nmulti,\"one\ntwo\"\n");

    assert_eq!(
        values,
        map(&[("a,b", "say \"hi\""), ("multi", "one\ntwo")])
    );
}

#[test]
fn test_parse_empty_value_and_crlf() {
    let (values, _) = parse("empty,\r\nwin,dows\r\n");

    assert_eq!(values, map(&[("empty", ""), ("win", "dows")]));
}

#[test]
fn test_parse_missing_trailing_newline() {
    let (values, _) = parse("a,1\nb,2");

    assert_eq!(values, map(&[("a", "1"), ("b", "2")]));
}

#[test]
fn test_parse_stray_quote_is_error() {
    let result = RecordReader::parse(Path::new("test.csv"), b"a,b\"c\n");

    assert!(matches!(result, Err(MementoError::Parse { .. })));
}

fn assert_parse_error(raw: &str, reason_fragment: &str) {
    match RecordReader::parse(Path::new("test.csv"), raw.as_bytes()) {
        Err(MementoError::Parse { reason, .. }) => assert!(
            reason.contains(reason_fragment),
            "reason {:?} should mention {:?}",
            reason,
            reason_fragment
        ),
        other => panic!("expected parse error for {:?}, got {:?}", raw, other),
    }
}

#[test]
fn test_parse_unterminated_quote_reports_opening_line() {
    assert_parse_error("a,1\nb,\"open\nc,3\n", "line 2: unterminated quoted field");
}

#[test]
fn test_parse_unterminated_quote_with_even_quote_count() {
    assert_parse_error("title,6\" ruler\n\"open,1\nkeep,2\n", "line 1: bare quote");
}

#[test]
fn test_parse_text_after_closing_quote() {
    assert_parse_error("\"abc\"def,x\n", "after closing quote");
    assert_parse_error("k,\"v\" \n", "after closing quote");
}

#[test]
fn test_parse_two_bare_quotes_in_field() {
    assert_parse_error("greeting,say \"hi\"\n", "bare quote");
}

#[test]
fn test_parse_closing_quote_at_eof_and_before_crlf() {
    let (values, _) = parse("a,\"1\"\r\nb,\"2\"");

    assert_eq!(values, map(&[("a", "1"), ("b", "2")]));
}

// =============================================================================
// RecordWriter Tests
// =============================================================================

#[test]
fn test_writer_layout_and_quoting() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "").unwrap();
    let writer = RecordWriter::new(&path, WriteStrategy::Truncate, false);

    writer
        .persist(&map(&[
            ("plain", "value"),
            ("comma", "a,b"),
            ("quote", "x\"y"),
            ("newline", "1\n2"),
        ]))
        .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "comma,\"a,b\"\nnewline,\"1\n2\"\nplain,value\nquote,\"x\"\"y\"\n"
    );
}

#[test]
fn test_writer_truncates_previous_contents() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "old,1\nolder,2\nlots,of\nstale,data\n").unwrap();
    let writer = RecordWriter::new(&path, WriteStrategy::Truncate, true);

    writer.persist(&map(&[("new", "1")])).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new,1\n");
}

#[test]
fn test_writer_empty_map_empties_file() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "old,1\n").unwrap();
    let writer = RecordWriter::new(&path, WriteStrategy::Truncate, false);

    writer.persist(&BTreeMap::new()).unwrap();

    assert_eq!(fs::read(&path).unwrap().len(), 0);
}

#[test]
fn test_truncate_writer_does_not_create_file() {
    let (_temp, path) = setup_temp_file();
    let writer = RecordWriter::new(&path, WriteStrategy::Truncate, false);

    let result = writer.persist(&map(&[("a", "1")]));

    assert!(matches!(result, Err(MementoError::Write { .. })));
    assert!(!path.exists());
}

#[test]
fn test_atomic_writer_replaces_file() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "old,1\n").unwrap();
    let writer = RecordWriter::new(&path, WriteStrategy::AtomicRename, false);

    writer.persist(&map(&[("a", "1"), ("b", "2")])).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a,1\nb,2\n");
    assert_eq!(writer.path(), path.as_path());
}

#[test]
fn test_written_file_parses_back() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "").unwrap();
    let original = map(&[
        ("", "empty key"),
        ("spaces", "  both sides  "),
        ("tricky", "\",\"\r\n"),
        ("unicode", "日本語"),
    ]);

    RecordWriter::new(&path, WriteStrategy::Truncate, false)
        .persist(&original)
        .unwrap();
    let (loaded, stats) = RecordReader::load(&path).unwrap();

    assert_eq!(loaded, original);
    assert_eq!(stats.records_skipped, 0);
}
