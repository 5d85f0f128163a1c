//! Build status of the output tree, computed without touching the generator.

use std::collections::HashSet;
use std::path::Path;

use bkb_core::{BiomarkerRecord, DocumentKey, decode_filename};
use serde::Serialize;

use crate::fs::is_built;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStatus {
    pub category: String,
    pub total: usize,
    pub built: usize,
    /// Indices of records with no usable document yet.
    pub missing: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub total: usize,
    pub built: usize,
    pub categories: Vec<CategoryStatus>,
    /// Document files in the output tree that no current record maps to.
    pub orphans: Vec<String>,
}

/// Compare the record table against the output tree.
///
/// Categories appear in first-appearance order. Unreadable directories are
/// treated as empty.
#[must_use]
pub fn scan_status(records: &[BiomarkerRecord], output_dir: &Path) -> StatusReport {
    let mut report = StatusReport::default();
    let mut expected = HashSet::new();

    for record in records {
        let key = record.key();
        let built = is_built(&key.path_in(output_dir));
        expected.insert(key.relative_path());

        let position = report
            .categories
            .iter()
            .position(|c| c.category == key.category_dir);
        let entry = if let Some(position) = position {
            &mut report.categories[position]
        } else {
            report.categories.push(CategoryStatus {
                category: key.category_dir.clone(),
                total: 0,
                built: 0,
                missing: Vec::new(),
            });
            let last = report.categories.len() - 1;
            &mut report.categories[last]
        };

        entry.total += 1;
        report.total += 1;
        if built {
            entry.built += 1;
            report.built += 1;
        } else {
            entry.missing.push(record.index);
        }
    }

    report.orphans = find_orphans(output_dir, &expected);
    report
}

fn find_orphans(output_dir: &Path, expected: &HashSet<String>) -> Vec<String> {
    let Ok(categories) = std::fs::read_dir(output_dir) else {
        return Vec::new();
    };

    let mut orphans = Vec::new();
    for category in categories.flatten() {
        if !category.path().is_dir() {
            continue;
        }
        let Ok(files) = std::fs::read_dir(category.path()) else {
            continue;
        };
        for file in files.flatten() {
            let filename = file.file_name().to_string_lossy().into_owned();
            if decode_filename(&filename).is_none() {
                continue;
            }
            let key = DocumentKey {
                category_dir: category.file_name().to_string_lossy().into_owned(),
                filename,
            };
            if !expected.contains(&key.relative_path()) {
                orphans.push(key.relative_path());
            }
        }
    }
    orphans.sort();
    orphans
}
