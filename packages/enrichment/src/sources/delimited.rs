//! Delimited-text input.

use std::io::Read;
use std::path::Path;

use crate::error::{SourceError, SourceResult};
use crate::types::table::Table;

const UTF8_BOM: char = '\u{feff}';

/// Parse a CSV stream whose first record is the header.
///
/// Ragged rows are accepted and padded to the header width.
pub fn read_csv<R: Read>(reader: R) -> SourceResult<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(UTF8_BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        return Err(SourceError::EmptyTable);
    }

    let rows = csv_reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    Ok(Table::new(columns, rows))
}

/// Read a CSV file from disk.
pub fn read_csv_path(path: impl AsRef<Path>) -> SourceResult<Table> {
    let file = std::fs::File::open(path)?;
    read_csv(std::io::BufReader::new(file))
}
