//! Row source + codec integration over a real file on disk.

use std::io::Write;

use bkb_core::{ColumnNames, DocumentKey, read_records};
use pretty_assertions::assert_eq;

#[test]
fn reads_file_and_derives_document_keys() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "category,Biomarkers_en,Biomarkers_cn,unit").unwrap();
    writeln!(file, "Lipids,Non-HDL Cholesterol,Non-HDL 胆固醇,mmol/L").unwrap();
    writeln!(file, "Kidney Health,Urine Albumin/Creatinine,尿白蛋白/肌酐比值,mg/g").unwrap();
    writeln!(file, "\"Thyroid, misc\",\"T3 (free)\",游离T3,pmol/L").unwrap();

    let records = read_records(file.path(), &ColumnNames::default()).unwrap();
    let keys: Vec<DocumentKey> = records.iter().map(bkb_core::BiomarkerRecord::key).collect();

    assert_eq!(
        keys.iter().map(DocumentKey::relative_path).collect::<Vec<_>>(),
        vec![
            "Lipids/001|Non-HDL Cholesterol|Non-HDL 胆固醇.md".to_string(),
            "Kidney Health/002|Urine Albumin-Creatinine|尿白蛋白-肌酐比值.md".to_string(),
            "Thyroid, misc/003|T3 (free)|游离T3.md".to_string(),
        ]
    );
}

#[test]
fn malformed_utf8_row_reports_row_number() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"category,Biomarkers_en,Biomarkers_cn\nA,B,C\nA,\xff\xfe,C\n")
        .unwrap();

    let err = read_records(file.path(), &ColumnNames::default()).unwrap_err();
    assert!(
        matches!(err, bkb_core::SourceError::Row { row: 2, .. }),
        "unexpected error: {err}"
    );
}
