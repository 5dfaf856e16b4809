//! Writer for enriched tables.
//!
//! Output is UTF-8 CSV: the source headers followed by the enrichment
//! columns. Rows are written to a temporary file in the destination directory
//! which is then renamed over the destination, so a failed run never leaves a
//! half-written table behind.

use std::path::Path;

use reelgraft_common::{EnrichedRecord, ENRICHMENT_COLUMNS};
use tempfile::NamedTempFile;

use super::TableError;

/// Write `rows` to `path`.
///
/// `columns` selects, by index into `headers` and into each record's cells,
/// the source columns to copy; the enrichment columns follow them.
pub fn write_table(
    path: &Path,
    headers: &[String],
    columns: &[usize],
    rows: &[EnrichedRecord],
) -> Result<(), TableError> {
    let io_err = |source| TableError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;

    {
        let mut writer = csv::Writer::from_writer(tmp.as_file_mut());

        let header = columns
            .iter()
            .map(|&i| headers.get(i).map(String::as_str).unwrap_or(""))
            .chain(ENRICHMENT_COLUMNS.iter().copied());
        writer.write_record(header).map_err(csv_err)?;

        for row in rows {
            writer
                .write_record(row.to_cells(columns))
                .map_err(csv_err)?;
        }
        writer.flush().map_err(io_err)?;
    }

    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "Wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelgraft_common::{EnrichmentFields, SourceRecord};
    use tempfile::tempdir;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let headers = vec!["Name".to_string(), "Year".to_string()];
        let rows = vec![EnrichedRecord::new(
            SourceRecord::new("Amélie", "2001"),
            EnrichmentFields {
                director: Some("Jean-Pierre Jeunet".into()),
                countries: Some("France, Germany".into()),
                ..Default::default()
            },
        )];

        write_table(&path, &headers, &[0, 1], &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,Year,TMDB_Genres,TMDB_Poster_URL,TMDB_Origin_Country,Runtime_Minutes,\
             Original_Language,TMDB_Vote_Average,TMDB_Popularity,Revenue_USD,Budget_USD,\
             Tagline,Director,Top_Cast"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Amélie,2001,,,\"France, Germany\",,,,,,,,Jean-Pierre Jeunet,"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn repeated_headers_are_written_by_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let headers: Vec<String> = ["Name", "Year", "Tags", "Tags"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let record = SourceRecord::from_cells(
            "Arrival",
            "2016",
            vec!["Arrival".into(), "2016".into(), "first".into(), "second".into()],
        );
        let rows = vec![EnrichedRecord::new(record, EnrichmentFields::default())];

        write_table(&path, &headers, &[0, 1, 2, 3], &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("Name,Year,Tags,Tags,TMDB_Genres"));
        assert_eq!(lines.next().unwrap(), "Arrival,2016,first,second,,,,,,,,,,,,");
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale").unwrap();

        write_table(&path, &["Name".to_string(), "Year".to_string()], &[0, 1], &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Name,Year,TMDB_Genres"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");
        assert!(write_table(&path, &[], &[], &[]).is_err());
    }
}
