//! Row types for the watched/watchlist tables.
//!
//! A [`SourceRecord`] knows the two columns the enrichment pipeline needs
//! (`Name` and `Year`) and carries the whole input row as positional cells.
//! Cells are addressed by column index, so repeated headers never collide.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fields::EnrichmentFields;

/// Header of the title column in Letterboxd exports.
pub const TITLE_COLUMN: &str = "Name";

/// Header of the release year column in Letterboxd exports.
pub const YEAR_COLUMN: &str = "Year";

/// One input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub title: String,
    /// Canonical year, e.g. `"2016"`.
    pub year: String,
    /// Every cell of the row in header order, with the year cell canonical.
    pub cells: Vec<String>,
}

impl SourceRecord {
    /// A row of a table whose only columns are `Name` and `Year`.
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        let title = title.into();
        let year = year.into();
        Self {
            cells: vec![title.clone(), year.clone()],
            title,
            year,
        }
    }

    pub fn from_cells(title: impl Into<String>, year: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            cells,
        }
    }

    /// Cell at column `index`. Columns past the end of a short row read as
    /// empty.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// A source row together with the metadata found for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub source: SourceRecord,
    pub fields: EnrichmentFields,
}

impl EnrichedRecord {
    pub fn new(source: SourceRecord, fields: EnrichmentFields) -> Self {
        Self { source, fields }
    }

    /// Render the row: the source cells at `columns`, then the enrichment
    /// cells.
    pub fn to_cells(&self, columns: &[usize]) -> Vec<String> {
        columns
            .iter()
            .map(|&i| self.source.cell(i).to_string())
            .chain(self.fields.to_cells())
            .collect()
    }
}

/// Canonicalize a raw `Year` cell.
///
/// Spreadsheet round-trips turn `2016` into `2016.0`; the metadata service
/// wants the bare integer. Fractional values truncate toward zero.
///
/// Returns `Ok(None)` for a missing year (empty cell or `NaN`) and an error
/// for anything that is not a number.
pub fn canonical_year(raw: &str) -> Result<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(year) = raw.parse::<i64>() {
        return Ok(Some(year.to_string()));
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(None),
        Ok(value) if value.is_finite() => Ok(Some((value.trunc() as i64).to_string())),
        _ => Err(Error::invalid_year(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_integer_passes_through() {
        assert_eq!(canonical_year("1999").unwrap(), Some("1999".to_string()));
        assert_eq!(canonical_year(" 2001 ").unwrap(), Some("2001".to_string()));
    }

    #[test]
    fn year_float_drops_decimal() {
        assert_eq!(canonical_year("2016.0").unwrap(), Some("2016".to_string()));
        assert_eq!(canonical_year("1984.7").unwrap(), Some("1984".to_string()));
    }

    #[test]
    fn year_missing() {
        assert_eq!(canonical_year("").unwrap(), None);
        assert_eq!(canonical_year("   ").unwrap(), None);
        assert_eq!(canonical_year("NaN").unwrap(), None);
    }

    #[test]
    fn year_not_a_number() {
        assert!(matches!(canonical_year("soon"), Err(Error::InvalidYear(_))));
        assert!(matches!(canonical_year("inf"), Err(Error::InvalidYear(_))));
    }

    #[test]
    fn cell_lookup() {
        let record = SourceRecord::from_cells(
            "Arrival",
            "2016",
            vec![
                "2024-01-05".into(),
                "Arrival".into(),
                "2016".into(),
                "https://boxd.it/abc".into(),
            ],
        );

        assert_eq!(record.cell(0), "2024-01-05");
        assert_eq!(record.cell(1), "Arrival");
        assert_eq!(record.cell(3), "https://boxd.it/abc");
        assert_eq!(record.cell(4), "");
        assert_eq!(SourceRecord::new("Arrival", "2016").cells, vec!["Arrival", "2016"]);
    }

    #[test]
    fn enriched_cells_follow_selected_columns() {
        let record = SourceRecord::from_cells(
            "Arrival",
            "2016",
            vec!["2024-01-05".into(), "Arrival".into(), "2016".into(), "Drama".into()],
        );
        let fields = EnrichmentFields {
            director: Some("Denis Villeneuve".into()),
            ..Default::default()
        };

        let cells = EnrichedRecord::new(record, fields).to_cells(&[0, 1, 2]);
        assert_eq!(cells.len(), 3 + crate::ENRICHMENT_FIELD_COUNT);
        assert_eq!(&cells[..3], ["2024-01-05", "Arrival", "2016"]);
        assert_eq!(cells[3 + 10], "Denis Villeneuve");
    }
}
