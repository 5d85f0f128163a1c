//! Presentation layer error types.

use std::path::PathBuf;

use thiserror::Error;

/// A requested document could not be read.
///
/// Shown inline to whoever asked for the document; never fatal.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("document not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while writing or serving the static site.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode site index: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },
}
