//! Splits CSV text into header-keyed raw rows.

use tkdash_core::{RawRow, RowError};

use crate::error::IngestError;

/// Rows that could be read, plus rows the CSV reader itself rejected.
#[derive(Debug, Default)]
pub struct RawRows {
    /// `(line, row)` pairs; `line` is the 1-based physical line the record
    /// starts on.
    pub rows: Vec<(usize, RawRow)>,
    pub errors: Vec<RowError>,
}

/// Reads `text` as a headed CSV document.
///
/// Headers and cells are trimmed and a leading UTF-8 BOM is dropped from the
/// first header. Short rows are allowed: missing trailing cells are simply
/// absent from the row map.
///
/// # Errors
///
/// Returns [`IngestError::Header`] if the header row itself cannot be read.
pub fn read_rows(text: &str) -> Result<RawRows, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(IngestError::Header)?
        .iter()
        .map(normalize_header_name)
        .collect();

    let mut out = RawRows::default();
    for (idx, result) in reader.records().enumerate() {
        let position = match &result {
            Ok(record) => record.position(),
            Err(e) => e.position(),
        };
        // Falls back to one record per line when the reader has no position.
        let line = position.map_or(idx + 2, physical_line);
        match result {
            Ok(record) => {
                let row: RawRow = headers
                    .iter()
                    .zip(record.iter())
                    .filter(|(header, _)| !header.is_empty())
                    .map(|(header, value)| (header.clone(), value.to_string()))
                    .collect();
                out.rows.push((line, row));
            }
            Err(e) => {
                tracing::debug!(line, error = %e, "unreadable CSV record");
                out.errors.push(RowError {
                    line,
                    column: None,
                    raw: None,
                    message: format!("CSV parse error: {e}"),
                });
            }
        }
    }

    Ok(out)
}

fn physical_line(position: &csv::Position) -> usize {
    usize::try_from(position.line()).unwrap_or(usize::MAX)
}

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').trim().to_string()
}
