//! Reader for Letterboxd CSV exports.
//!
//! The header row must contain `Name` and `Year`. Rows whose title or year
//! is blank are dropped; every other column is kept verbatim, by position.
//! When a header repeats, the first occurrence of `Name` or `Year` is the one
//! read as title or year and the rest pass through like any other column.

use std::path::Path;

use reelgraft_common::{
    canonical_year, Error, SourceRecord, ENRICHMENT_COLUMNS, TITLE_COLUMN, YEAR_COLUMN,
};

use super::TableError;

/// A loaded input table.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    /// Input headers, in file order.
    pub headers: Vec<String>,
    /// Retained rows, in file order.
    pub records: Vec<SourceRecord>,
    /// Rows discarded for a missing title or year.
    pub dropped: usize,
}

impl SourceTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indices of the columns copied to the output. Enrichment columns left
    /// over from an earlier run are skipped so they are not written twice.
    pub fn source_columns(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !ENRICHMENT_COLUMNS.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Read and filter the table at `path`.
///
/// Fails with [`TableError::NotFound`] when the file does not exist, and with
/// another variant when it exists but cannot be used: malformed CSV, invalid
/// UTF-8, a missing `Name`/`Year` header, a row wider than the header, or a
/// year that is not a number.
pub fn read_table(path: &Path) -> Result<SourceTable, TableError> {
    if !path.exists() {
        return Err(TableError::NotFound(path.to_path_buf()));
    }

    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::Schema {
                path: path.to_path_buf(),
                source: Error::missing_column(name),
            })
    };
    let title_idx = column(TITLE_COLUMN)?;
    let year_idx = column(YEAR_COLUMN)?;

    let mut records = Vec::new();
    let mut dropped = 0;

    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(csv_err)?;
        let line = row.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);
        let row_err = |source| TableError::Row {
            path: path.to_path_buf(),
            line,
            source,
        };

        if row.len() > headers.len() {
            return Err(row_err(Error::invalid_input(format!(
                "expected {} fields, found {}",
                headers.len(),
                row.len()
            ))));
        }

        let title = row.get(title_idx).unwrap_or("");
        if title.trim().is_empty() {
            dropped += 1;
            continue;
        }

        let year = match canonical_year(row.get(year_idx).unwrap_or("")).map_err(row_err)? {
            Some(year) => year,
            None => {
                dropped += 1;
                continue;
            }
        };

        // Short rows read as empty trailing cells.
        let mut cells: Vec<String> = (0..headers.len())
            .map(|i| row.get(i).unwrap_or("").to_string())
            .collect();
        cells[year_idx] = year.clone();
        let record = SourceRecord::from_cells(title, year, cells);
        records.push(record);
    }

    tracing::debug!(
        path = %path.display(),
        retained = records.len(),
        dropped,
        "Loaded table"
    );

    Ok(SourceTable {
        headers,
        records,
        dropped,
    })
}
