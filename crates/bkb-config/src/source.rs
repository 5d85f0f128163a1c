//! Row source configuration.

use bkb_core::ColumnNames;
use serde::{Deserialize, Serialize};

fn default_csv_path() -> String {
    "marker.csv".to_string()
}

fn default_category_column() -> String {
    ColumnNames::default().category
}

fn default_name_foreign_column() -> String {
    ColumnNames::default().name_foreign
}

fn default_name_local_column() -> String {
    ColumnNames::default().name_local
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Path of the biomarker table.
    #[serde(default = "default_csv_path")]
    pub csv_path: String,

    #[serde(default = "default_category_column")]
    pub category_column: String,

    /// Header of the English name column.
    #[serde(default = "default_name_foreign_column")]
    pub name_foreign_column: String,

    /// Header of the local-language name column.
    #[serde(default = "default_name_local_column")]
    pub name_local_column: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            category_column: default_category_column(),
            name_foreign_column: default_name_foreign_column(),
            name_local_column: default_name_local_column(),
        }
    }
}

impl SourceConfig {
    #[must_use]
    pub fn columns(&self) -> ColumnNames {
        ColumnNames {
            category: self.category_column.clone(),
            name_foreign: self.name_foreign_column.clone(),
            name_local: self.name_local_column.clone(),
        }
    }
}
