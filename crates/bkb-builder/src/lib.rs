//! # bkb-builder
//!
//! Sequential batch generation of biomarker documents.
//!
//! The output tree is the only state: a record is done when its document
//! exists and is non-empty. Re-running a build therefore only attempts
//! records that previously failed or were added since, and a run can resume
//! from any row with [`BuildOptions::start`].

mod builder;
mod error;
pub mod fs;
mod status;

pub use builder::{
    BatchBuilder, BuildOptions, BuildReport, OutcomeStatus, RecordOutcome, plan, select_range,
};
pub use error::BuildError;
pub use status::{CategoryStatus, StatusReport, scan_status};
