//! CSV row source.
//!
//! Columns are located by header name so their order in the file does not
//! matter. Auxiliary columns are ignored.

use std::io::Read;
use std::path::Path;

use crate::errors::SourceError;
use crate::record::BiomarkerRecord;

/// Header names of the three columns the builder reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub category: String,
    pub name_foreign: String,
    pub name_local: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            category: "category".to_string(),
            name_foreign: "Biomarkers_en".to_string(),
            name_local: "Biomarkers_cn".to_string(),
        }
    }
}

/// Read every record from a CSV file, in table order.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be opened, a required column is
/// missing, or a row is malformed.
pub fn read_records(path: &Path, columns: &ColumnNames) -> Result<Vec<BiomarkerRecord>, SourceError> {
    let file = std::fs::File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_records_from(file, columns)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "row source loaded");
    Ok(records)
}

/// Read every record from any CSV byte stream, in table order.
///
/// # Errors
///
/// See [`read_records`].
pub fn read_records_from<R: Read>(
    reader: R,
    columns: &ColumnNames,
) -> Result<Vec<BiomarkerRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(SourceError::Header)?.clone();
    let position = |name: &str| -> Result<usize, SourceError> {
        headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
            .ok_or_else(|| SourceError::MissingColumn {
                column: name.to_string(),
            })
    };
    let category_col = position(&columns.category)?;
    let foreign_col = position(&columns.name_foreign)?;
    let local_col = position(&columns.name_local)?;

    let mut records = Vec::new();
    for (offset, row) in reader.records().enumerate() {
        let row_number = offset + 1;
        let row = row.map_err(|source| SourceError::Row {
            row: row_number,
            source,
        })?;
        let field = |col: usize| row.get(col).map(str::trim).unwrap_or_default().to_string();
        let index = u32::try_from(row_number).map_err(|_| SourceError::TooManyRows)?;

        records.push(BiomarkerRecord {
            index,
            category: field(category_col),
            name_foreign: field(foreign_col),
            name_local: field(local_col),
        });
    }

    Ok(records)
}
