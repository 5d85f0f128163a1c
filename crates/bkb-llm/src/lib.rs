//! # bkb-llm
//!
//! Document generation for `biomarker-kb`.
//!
//! [`DocumentGenerator`] is the seam the batch builder depends on: one call
//! per record, returning the raw document text. [`ChatCompletionGenerator`]
//! implements it against any OpenAI-compatible chat completion endpoint
//! (Moonshot by default). There is no retry, backoff, or rate limiting here;
//! a failed record is attempted again on the next build run.

mod chat;
mod error;
mod http;
pub mod prompt;

use std::future::Future;

use bkb_core::BiomarkerRecord;

pub use chat::ChatCompletionGenerator;
pub use error::GenerationError;

/// Produces the document text for one record.
pub trait DocumentGenerator {
    /// Generate the document for `record`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the service call fails or yields no
    /// usable text.
    fn generate(
        &self,
        record: &BiomarkerRecord,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}
