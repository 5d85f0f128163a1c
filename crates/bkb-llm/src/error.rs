//! Generation error types.

use thiserror::Error;

/// Errors from a single document generation request.
///
/// None of these are retried here; the batch builder logs them and moves on.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key was configured.
    #[error("no API key configured (set BKB_LLM__API_KEY or MOONSHOT_API_KEY)")]
    MissingApiKey,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse the response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no usable text.
    #[error("service returned an empty response")]
    EmptyResponse,
}
