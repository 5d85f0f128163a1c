//! Row source error types.
//!
//! Every variant is fatal for a build run: nothing is generated when the
//! table cannot be read.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The table file could not be opened.
    #[error("failed to open row source {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row could not be read.
    #[error("failed to read header row: {0}")]
    Header(#[source] csv::Error),

    /// A required column is absent from the header row.
    #[error("row source is missing required column '{column}'")]
    MissingColumn { column: String },

    /// A data row is malformed (invalid UTF-8, broken quoting, I/O error).
    #[error("malformed row {row}: {source}")]
    Row {
        /// 1-based data row number.
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// The table has more rows than a record index can address.
    #[error("row source has more than {max} rows", max = u32::MAX)]
    TooManyRows,
}
