//! Common error types used throughout reelgraft.
//!
//! These cover problems with the shape of a single input row. Failures of the
//! remote service and of file I/O have their own error types in the main crate.

/// Common error type for reelgraft.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `Year` cell held something other than a number.
    #[error("Invalid year: {0:?}")]
    InvalidYear(String),

    /// A required column is absent from the table header.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new InvalidYear error.
    pub fn invalid_year<S: Into<String>>(value: S) -> Self {
        Self::InvalidYear(value.into())
    }

    /// Create a new MissingColumn error.
    pub fn missing_column<S: Into<String>>(column: S) -> Self {
        Self::MissingColumn(column.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
