//! # bkb-core
//!
//! Core types shared by every `biomarker-kb` crate:
//! - [`BiomarkerRecord`], one row of the biomarker table
//! - the CSV row source that reads those records in table order
//! - the filename codec that addresses each record's generated document
//! - the row source error type
//!
//! The codec is the one piece of logic both the batch builder and the
//! presentation layer depend on. Both sides go through [`DocumentKey`] so a
//! document written at build time is always found at display time.

pub mod codec;
pub mod errors;
pub mod record;
pub mod source;

pub use codec::{DocumentKey, category_dir, decode_filename, encode_filename};
pub use errors::SourceError;
pub use record::BiomarkerRecord;
pub use source::{ColumnNames, read_records, read_records_from};
