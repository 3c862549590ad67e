//! Result export: the input's own columns plus the generated message, one row per record.

use crate::batch::{JobId, ResultMap};
use crate::error::OutreachError;
use crate::input::InputTable;
use csv::Writer;
use std::io::Write;
use std::path::Path;

pub const MESSAGE_COLUMN: &str = "generated_message";

/// Write `table` with its results to a CSV file at `path`.
///
/// Row `i` is paired with the result for `JobId(i)`; a row with no result gets an empty
/// message cell.
pub fn write_results(
    path: &Path,
    table: &InputTable,
    results: &ResultMap,
) -> Result<(), OutreachError> {
    let file = std::fs::File::create(path)?;
    write_results_to(file, table, results)
}

/// Same as [`write_results`] for any writer.
///
/// Columns and cell text are written as they were read. An input that already has a
/// `generated_message` column gets that column overwritten instead of a second one.
pub fn write_results_to<W: Write>(
    writer: W,
    table: &InputTable,
    results: &ResultMap,
) -> Result<(), OutreachError> {
    let existing = table
        .headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(MESSAGE_COLUMN));
    let width = table.headers.len() + usize::from(existing.is_none());
    let message_at = existing.unwrap_or(table.headers.len());

    let mut wtr = Writer::from_writer(writer);
    let mut header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    if existing.is_none() {
        header.push(MESSAGE_COLUMN);
    }
    wtr.write_record(&header)?;

    for idx in 0..table.len() {
        let mut row: Vec<String> = table.rows.get(idx).cloned().unwrap_or_default();
        row.resize(width, String::new());
        row[message_at] = results
            .get(JobId(idx))
            .map(|result| result.render())
            .unwrap_or_default();
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
