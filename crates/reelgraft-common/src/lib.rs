//! Reelgraft-Common: Shared record types and utilities.
//!
//! This crate provides the types that flow between the table reader, the
//! metadata client and the table writer:
//!
//! - **Records**: [`SourceRecord`] (one input row) and [`EnrichedRecord`]
//!   (the same row with metadata attached)
//! - **Enrichment fields**: the fixed, ordered set of 12 metadata columns
//! - **Year handling**: canonicalization of spreadsheet-style years
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use reelgraft_common::{canonical_year, EnrichmentFields, ENRICHMENT_COLUMNS};
//!
//! assert_eq!(canonical_year("2016.0").unwrap(), Some("2016".to_string()));
//!
//! let fields = EnrichmentFields::default();
//! assert_eq!(fields.to_cells().len(), ENRICHMENT_COLUMNS.len());
//! ```

pub mod error;
pub mod fields;
pub mod record;

pub use error::{Error, Result};
pub use fields::{EnrichmentFields, ENRICHMENT_COLUMNS, ENRICHMENT_FIELD_COUNT};
pub use record::{canonical_year, EnrichedRecord, SourceRecord, TITLE_COLUMN, YEAR_COLUMN};
