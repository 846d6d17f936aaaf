//! Batch file parser
//!
//! Turns comma-separated lines into [`Command`]s. Parsing is strict: any
//! malformed line fails the whole batch with its 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{Batch, Command};
use crate::config::Config;
use crate::error::{ChashError, Result};

/// Read and parse a batch file
pub fn read_batch(path: &Path, max_name_len: usize) -> Result<Batch> {
    let file = File::open(path)?;
    parse_batch(BufReader::new(file), max_name_len)
}

/// Read the batch a run is configured with
///
/// Unlike [`read_batch`], a file without any command is an error.
pub fn load_batch(config: &Config) -> Result<Batch> {
    let batch = read_batch(&config.commands_path, config.max_name_len)?;
    if batch.is_empty() {
        return Err(ChashError::EmptyBatch);
    }
    Ok(batch)
}

/// Parse a batch from any buffered reader
///
/// Blank lines are skipped, fields are trimmed and keywords are matched
/// case-insensitively. Delete and search tolerate a trailing numeric field,
/// and print tolerates trailing fields, as older batch files carry them.
pub fn parse_batch<R: BufRead>(reader: R, max_name_len: usize) -> Result<Batch> {
    let mut batch = Batch::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let keyword = fields[0].to_ascii_lowercase();

        if keyword == "threads" {
            expect_fields(&fields, 2, 2, line_no)?;
            let hint = fields[1].parse::<usize>().map_err(|e| parse_error(
                line_no,
                format!("invalid thread count {:?}: {}", fields[1], e),
            ))?;
            tracing::debug!(line = line_no, hint, "ignoring advisory thread count");
            batch.thread_hint = Some(hint);
            continue;
        }

        let command = match keyword.as_str() {
            "insert" => {
                expect_fields(&fields, 3, 3, line_no)?;
                let name = parse_name(fields[1], max_name_len, line_no)?;
                let value = parse_value(fields[2], line_no)?;
                Command::insert(name, value)
            }
            "delete" | "search" => {
                expect_fields(&fields, 2, 3, line_no)?;
                let name = parse_name(fields[1], max_name_len, line_no)?;
                if let Some(extra) = fields.get(2) {
                    parse_value(extra, line_no)?;
                }
                if keyword == "delete" {
                    Command::delete(name)
                } else {
                    Command::search(name)
                }
            }
            "print" => {
                if fields.len() > 1 {
                    tracing::trace!(line = line_no, "ignoring trailing fields on print");
                }
                Command::print()
            }
            other => {
                return Err(parse_error(line_no, format!("unknown command {:?}", other)));
            }
        };

        tracing::trace!(line = line_no, kind = command.kind.as_str(), "parsed command");
        batch.commands.push(command);
    }

    tracing::debug!(
        commands = batch.len(),
        inserts = batch.insert_count(),
        "parsed batch"
    );
    Ok(batch)
}

fn expect_fields(fields: &[&str], min: usize, max: usize, line: usize) -> Result<()> {
    if fields.len() < min || fields.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{}-{}", min, max)
        };
        return Err(parse_error(
            line,
            format!(
                "{}: expected {} fields, got {}",
                fields[0],
                expected,
                fields.len()
            ),
        ));
    }
    Ok(())
}

fn parse_name(raw: &str, max_name_len: usize, line: usize) -> Result<String> {
    if raw.is_empty() {
        return Err(parse_error(line, "missing name".to_string()));
    }
    if raw.len() > max_name_len {
        return Err(ChashError::NameTooLong {
            line,
            len: raw.len(),
            max: max_name_len,
        });
    }
    Ok(raw.to_string())
}

fn parse_value(raw: &str, line: usize) -> Result<u32> {
    raw.parse::<u32>()
        .map_err(|e| parse_error(line, format!("invalid value {:?}: {}", raw, e)))
}

fn parse_error(line: usize, reason: String) -> ChashError {
    ChashError::Parse { line, reason }
}
