//! Per-record build errors.
//!
//! Both variants name the record they belong to. Neither aborts a batch.

use std::path::PathBuf;

use bkb_llm::GenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    /// The document generator failed for this record.
    #[error("generation failed for {label}: {source}")]
    Generation {
        label: String,
        #[source]
        source: GenerationError,
    },

    /// The generated text could not be written.
    #[error("failed to write {} for {label}: {source}", path.display())]
    Write {
        label: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
