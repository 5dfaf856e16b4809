//! CSV table I/O.
//!
//! - [`reader`] -- Loads a Letterboxd export into a [`SourceTable`].
//! - [`writer`] -- Writes enriched rows, replacing the destination atomically.

pub mod reader;
pub mod writer;

use std::path::PathBuf;

pub use reader::{read_table, SourceTable};
pub use writer::write_table;

/// Errors raised while reading or writing a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Input file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to parse {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid header in {path:?}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: reelgraft_common::Error,
    },

    #[error("Invalid row at {path:?} line {line}: {source}")]
    Row {
        path: PathBuf,
        line: u64,
        #[source]
        source: reelgraft_common::Error,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
