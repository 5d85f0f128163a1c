//! Filename codec for generated documents.
//!
//! A record's document lives at `{output_dir}/{category_dir}/{filename}` where
//!
//! ```text
//! filename = {index:03}|{name_foreign}|{name_local}.md
//! ```
//!
//! Only `/` and `\` are replaced (with `-`). The `|` field separator is kept
//! unescaped, and so is every other character, including a `|` inside a name.
//! Such a name still produces a stable filename, but [`decode_filename`] cannot
//! split it back into fields and returns `None`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::BiomarkerRecord;

/// Field separator inside a document filename.
pub const SEPARATOR: char = '|';

/// Document file extension.
pub const EXTENSION: &str = "md";

/// Replace path-hostile characters with `-`.
fn sanitize(value: &str) -> String {
    value.replace(['/', '\\'], "-")
}

/// Build the document filename for a record.
///
/// Pure and deterministic: identical inputs always give identical output.
///
/// ```
/// use bkb_core::encode_filename;
///
/// assert_eq!(
///     encode_filename(1, "Non-HDL Cholesterol", "Non-HDL 胆固醇"),
///     "001|Non-HDL Cholesterol|Non-HDL 胆固醇.md"
/// );
/// ```
#[must_use]
pub fn encode_filename(index: u32, name_foreign: &str, name_local: &str) -> String {
    format!(
        "{index:03}{SEPARATOR}{}{SEPARATOR}{}.{EXTENSION}",
        sanitize(name_foreign),
        sanitize(name_local)
    )
}

/// Directory name used for a blank category.
pub const BLANK_CATEGORY_DIR: &str = "_";

/// Directory name for a category: slashes replaced, surrounding whitespace trimmed.
///
/// A result that would not name a child directory is replaced: blank becomes
/// [`BLANK_CATEGORY_DIR`], and `.` / `..` have their dots replaced with `-`.
#[must_use]
pub fn category_dir(category: &str) -> String {
    let dir = sanitize(category);
    match dir.trim() {
        "" => BLANK_CATEGORY_DIR.to_string(),
        dots @ ("." | "..") => dots.replace('.', "-"),
        name => name.to_string(),
    }
}

/// Split a document filename back into `(index, name_foreign, name_local)`.
///
/// Returns `None` for anything that is not a document filename, and for
/// filenames whose names contain the separator themselves, which cannot be
/// split unambiguously.
#[must_use]
pub fn decode_filename(filename: &str) -> Option<(u32, String, String)> {
    let stem = filename.strip_suffix(&format!(".{EXTENSION}"))?;
    let mut fields = stem.split(SEPARATOR);
    let index = fields.next()?;
    let name_foreign = fields.next()?;
    let name_local = fields.next()?;
    if fields.next().is_some() || index.len() < 3 || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((
        index.parse().ok()?,
        name_foreign.to_string(),
        name_local.to_string(),
    ))
}

/// Location of one record's document relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey {
    pub category_dir: String,
    pub filename: String,
}

impl DocumentKey {
    #[must_use]
    pub fn for_record(record: &BiomarkerRecord) -> Self {
        Self {
            category_dir: category_dir(&record.category),
            filename: encode_filename(record.index, &record.name_foreign, &record.name_local),
        }
    }

    /// `{category_dir}/{filename}`, always `/`-separated.
    #[must_use]
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.category_dir, self.filename)
    }

    /// Absolute (or `root`-relative) filesystem path of the document.
    #[must_use]
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.category_dir).join(&self.filename)
    }
}
