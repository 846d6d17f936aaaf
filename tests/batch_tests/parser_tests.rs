//! Batch Parser Tests
//!
//! Tests verify:
//! - Each command form parses
//! - The advisory thread directive
//! - Tolerated legacy trailing fields
//! - Errors carry the offending line number
//! - Reading from a file on disk

use std::io::{Cursor, Write};

use chash::batch::{parse_batch, read_batch, Batch, Command, CommandKind};
use chash::config::DEFAULT_MAX_NAME_LEN;
use chash::ChashError;
use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

fn parse(text: &str) -> chash::Result<Batch> {
    parse_batch(Cursor::new(text), DEFAULT_MAX_NAME_LEN)
}

fn parse_error_line(text: &str) -> usize {
    match parse(text) {
        Err(ChashError::Parse { line, .. }) => line,
        Err(ChashError::NameTooLong { line, .. }) => line,
        other => panic!("expected a parse error, got {:?}", other),
    }
}

// =============================================================================
// Valid Input Tests
// =============================================================================

#[test]
fn test_parse_all_kinds() {
    let batch = parse("insert,Alice,100\ndelete,Alice\nsearch,Bob\nprint\n").unwrap();

    assert_eq!(
        batch.commands,
        vec![
            Command::insert("Alice", 100),
            Command::delete("Alice"),
            Command::search("Bob"),
            Command::print(),
        ]
    );
    assert_eq!(batch.thread_hint, None);
    assert_eq!(batch.insert_count(), 1);
}

#[test]
fn test_threads_directive_is_advisory() {
    let batch = parse("threads,4\ninsert,A,1\ninsert,B,2\n").unwrap();

    assert_eq!(batch.thread_hint, Some(4));
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.insert_count(), 2);
}

#[test]
fn test_whitespace_blank_lines_and_case() {
    let batch = parse("\n  INSERT , Richard Garriot , 40000 \r\n\n Search,Richard Garriot\n").unwrap();

    assert_eq!(
        batch.commands,
        vec![
            Command::insert("Richard Garriot", 40000),
            Command::search("Richard Garriot"),
        ]
    );
}

#[test]
fn test_legacy_trailing_fields() {
    let batch = parse("delete,Alice,0\nsearch,Bob,0\nprint,0,0\n").unwrap();

    assert_eq!(
        batch.commands,
        vec![Command::delete("Alice"), Command::search("Bob"), Command::print()]
    );
}

#[test]
fn test_empty_input() {
    let batch = parse("").unwrap();
    assert!(batch.is_empty());
}

#[test]
fn test_name_at_limit_accepted() {
    let name = "x".repeat(DEFAULT_MAX_NAME_LEN);
    let batch = parse(&format!("insert,{},1\n", name)).unwrap();
    assert_eq!(batch.commands[0].name, name);
}

#[test]
fn test_kind_labels() {
    assert_eq!(CommandKind::Insert.as_str(), "insert");
    assert_eq!(CommandKind::Print.label(), "PRINT");
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_unknown_command() {
    assert_eq!(parse_error_line("insert,A,1\nupdate,A,2\n"), 2);
}

#[test]
fn test_insert_missing_value() {
    assert_eq!(parse_error_line("insert,Alice\n"), 1);
}

#[test]
fn test_insert_non_numeric_value() {
    assert_eq!(parse_error_line("print\n\ninsert,Alice,lots\n"), 3);
}

#[test]
fn test_negative_value_rejected() {
    assert_eq!(parse_error_line("insert,Alice,-5\n"), 1);
}

#[test]
fn test_search_missing_name() {
    assert_eq!(parse_error_line("search\n"), 1);
    assert_eq!(parse_error_line("search,\n"), 1);
}

#[test]
fn test_bad_thread_count() {
    assert_eq!(parse_error_line("threads,many\n"), 1);
}

#[test]
fn test_name_too_long_rejected() {
    let name = "x".repeat(DEFAULT_MAX_NAME_LEN + 1);
    match parse(&format!("insert,{},1\n", name)) {
        Err(ChashError::NameTooLong { line, len, max }) => {
            assert_eq!(line, 1);
            assert_eq!(len, DEFAULT_MAX_NAME_LEN + 1);
            assert_eq!(max, DEFAULT_MAX_NAME_LEN);
        }
        other => panic!("expected NameTooLong, got {:?}", other),
    }
}

#[test]
fn test_custom_name_limit() {
    let result = parse_batch(Cursor::new("insert,Alice,1\n"), 3);
    assert!(matches!(result, Err(ChashError::NameTooLong { max: 3, .. })));
}

// =============================================================================
// File Tests
// =============================================================================

#[test]
fn test_read_batch_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "threads,2").unwrap();
    writeln!(file, "insert,Alice,100").unwrap();
    writeln!(file, "print").unwrap();
    file.flush().unwrap();

    let batch = read_batch(file.path(), DEFAULT_MAX_NAME_LEN).unwrap();

    assert_eq!(batch.thread_hint, Some(2));
    assert_eq!(
        batch.commands,
        vec![Command::insert("Alice", 100), Command::print()]
    );
}

#[test]
fn test_read_batch_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_batch(&dir.path().join("missing.txt"), DEFAULT_MAX_NAME_LEN);
    assert!(matches!(result, Err(ChashError::Io(_))));
}
