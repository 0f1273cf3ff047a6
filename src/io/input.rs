//! Batch file parser.
//!
//! # Format
//!
//! ```text
//! 3
//! 1, 0, 5, 2, 2
//! 2, 1, 3, 1, 2
//! 3, 2, 8, 3, 2
//! ```
//!
//! The first non-blank line is the process count. Each following line is
//! `id, arrival, burst, priority[, quantum]`. Blank lines are ignored.
//! Rows beyond the declared count are ignored; fewer rows is an error.

use std::fs;
use std::path::Path;

use crate::error::{SchedError, SchedResult};
use crate::models::Process;

/// Parses a batch from text.
///
/// Only the syntax is checked here. Semantic checks (duplicate IDs,
/// positive bursts) happen in [`crate::validation`] before a run.
///
/// # Errors
/// `InvalidInput` naming the offending line.
pub fn parse_batch(text: &str) -> SchedResult<Vec<Process>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| SchedError::invalid_input("missing process count line"))?;
    let count: usize = header.parse().map_err(|_| {
        SchedError::invalid_input(format!("line {header_no}: invalid process count '{header}'"))
    })?;

    let mut processes = Vec::with_capacity(count);
    for _ in 0..count {
        let (line_no, line) = lines.next().ok_or_else(|| {
            SchedError::invalid_input(format!(
                "expected {count} processes, found {}",
                processes.len()
            ))
        })?;
        processes.push(parse_row(line_no, line)?);
    }
    Ok(processes)
}

/// Reads and parses a batch file.
///
/// # Errors
/// `InvalidInput` if the file cannot be read or parsed.
pub fn read_batch_file(path: impl AsRef<Path>) -> SchedResult<Vec<Process>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        SchedError::invalid_input(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_batch(&text)
}

fn parse_row(line_no: usize, line: &str) -> SchedResult<Process> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if !(4..=5).contains(&fields.len()) {
        return Err(SchedError::invalid_input(format!(
            "line {line_no}: expected 4 or 5 fields, found {}",
            fields.len()
        )));
    }

    let field = |i: usize, name: &str| -> SchedResult<i64> {
        fields[i].parse::<i64>().map_err(|_| {
            SchedError::invalid_input(format!("line {line_no}: invalid {name} '{}'", fields[i]))
        })
    };

    let id = u32::try_from(field(0, "id")?)
        .map_err(|_| SchedError::invalid_input(format!("line {line_no}: id out of range")))?;
    let priority = i32::try_from(field(3, "priority")?)
        .map_err(|_| SchedError::invalid_input(format!("line {line_no}: priority out of range")))?;

    let mut process = Process::new(id, field(1, "arrival time")?, field(2, "burst time")?)
        .with_priority(priority);
    if fields.len() == 5 {
        process = process.with_time_quantum(field(4, "time quantum")?);
    }
    Ok(process)
}
