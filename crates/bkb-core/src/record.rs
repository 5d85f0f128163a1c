//! The biomarker record.

use serde::{Deserialize, Serialize};

use crate::codec::DocumentKey;

/// One row of the biomarker table.
///
/// `index` is the 1-based data row position assigned when the table is read.
/// It is never re-derived after range selection, so a record keeps the same
/// document name whatever `--start` a build runs with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomarkerRecord {
    pub index: u32,
    pub category: String,
    /// English name (`Biomarkers_en` column by default).
    pub name_foreign: String,
    /// Local-language name (`Biomarkers_cn` column by default).
    pub name_local: String,
}

impl BiomarkerRecord {
    #[must_use]
    pub fn new(
        index: u32,
        category: impl Into<String>,
        name_foreign: impl Into<String>,
        name_local: impl Into<String>,
    ) -> Self {
        Self {
            index,
            category: category.into(),
            name_foreign: name_foreign.into(),
            name_local: name_local.into(),
        }
    }

    /// Storage key of this record's generated document.
    #[must_use]
    pub fn key(&self) -> DocumentKey {
        DocumentKey::for_record(self)
    }

    /// Human-readable label used in logs, e.g. `#003 Albumin (白蛋白)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "#{:03} {} ({})",
            self.index, self.name_foreign, self.name_local
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_includes_padded_index_and_both_names() {
        let record = BiomarkerRecord::new(3, "Liver", "Albumin", "白蛋白");
        assert_eq!(record.label(), "#003 Albumin (白蛋白)");
    }

    #[test]
    fn key_matches_codec() {
        let record = BiomarkerRecord::new(12, " Kidney/Urine ", "A/B", "甲\\乙");
        let key = record.key();
        assert_eq!(key.category_dir, "Kidney-Urine");
        assert_eq!(key.filename, "012|A-B|甲-乙.md");
    }
}
