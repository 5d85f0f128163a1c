//! Batch builder behaviour over a real output directory with a fake generator.

use std::collections::HashSet;
use std::sync::Mutex;

use bkb_builder::{BatchBuilder, BuildOptions, OutcomeStatus, plan};
use bkb_core::BiomarkerRecord;
use bkb_llm::{DocumentGenerator, GenerationError};
use pretty_assertions::assert_eq;

/// Records every call; fails for the configured indices.
#[derive(Default)]
struct FakeGenerator {
    calls: Mutex<Vec<u32>>,
    failing: HashSet<u32>,
}

impl FakeGenerator {
    fn failing(indices: &[u32]) -> Self {
        Self {
            failing: indices.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

impl DocumentGenerator for &FakeGenerator {
    async fn generate(&self, record: &BiomarkerRecord) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(record.index);
        if self.failing.contains(&record.index) {
            return Err(GenerationError::Api {
                status: 500,
                message: "boom".into(),
            });
        }
        Ok(format!(
            "```markdown\n# {} ({})\n```",
            record.name_foreign, record.name_local
        ))
    }
}

fn table() -> Vec<BiomarkerRecord> {
    vec![
        BiomarkerRecord::new(1, "Lipids", "Non-HDL Cholesterol", "Non-HDL 胆固醇"),
        BiomarkerRecord::new(2, "Lipids", "LDL/HDL Ratio", "低/高密度脂蛋白比值"),
        BiomarkerRecord::new(3, "Kidney Health", "eGFR", "估算肾小球滤过率"),
        BiomarkerRecord::new(4, "Liver", "ALT", "谷丙转氨酶"),
    ]
}

fn count_files(root: &std::path::Path) -> usize {
    std::fs::read_dir(root)
        .map(|dirs| {
            dirs.flatten()
                .filter(|d| d.path().is_dir())
                .map(|d| std::fs::read_dir(d.path()).unwrap().count())
                .sum()
        })
        .unwrap_or(0)
}

#[tokio::test]
async fn builds_every_record_into_category_directories() {
    let dir = tempfile::tempdir().unwrap();
    let generator = FakeGenerator::default();
    let builder = BatchBuilder::new(&generator, BuildOptions::new(dir.path()));

    let report = builder.build(&table(), |_| {}).await;

    assert_eq!(report.selected, 4);
    assert_eq!(report.built, 4);
    assert_eq!(generator.calls(), vec![1, 2, 3, 4]);

    let doc = dir
        .path()
        .join("Lipids")
        .join("001|Non-HDL Cholesterol|Non-HDL 胆固醇.md");
    assert_eq!(
        std::fs::read_to_string(doc).unwrap(),
        "```markdown\n# Non-HDL Cholesterol (Non-HDL 胆固醇)\n```"
    );
    assert!(
        dir.path()
            .join("Lipids")
            .join("002|LDL-HDL Ratio|低-高密度脂蛋白比值.md")
            .is_file()
    );
    assert_eq!(count_files(dir.path()), 4);
}

#[tokio::test]
async fn second_run_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = FakeGenerator::default();
    BatchBuilder::new(&first, BuildOptions::new(dir.path()))
        .build(&table(), |_| {})
        .await;

    let second = FakeGenerator::default();
    let report = BatchBuilder::new(&second, BuildOptions::new(dir.path()))
        .build(&table(), |_| {})
        .await;

    assert!(second.calls().is_empty());
    assert_eq!(report.skipped, 4);
    assert_eq!(report.built, 0);
}

#[tokio::test]
async fn start_resumes_from_record_index_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let generator = FakeGenerator::default();
    let options = BuildOptions {
        start: 3,
        ..BuildOptions::new(dir.path())
    };

    let report = BatchBuilder::new(&generator, options)
        .build(&table(), |_| {})
        .await;

    assert_eq!(generator.calls(), vec![3, 4]);
    assert_eq!(
        report.outcomes.iter().map(|o| o.index).collect::<Vec<_>>(),
        vec![3, 4]
    );
}

#[tokio::test]
async fn limit_caps_the_selected_range() {
    let dir = tempfile::tempdir().unwrap();
    let generator = FakeGenerator::default();
    let options = BuildOptions {
        start: 2,
        limit: Some(2),
        ..BuildOptions::new(dir.path())
    };

    let report = BatchBuilder::new(&generator, options)
        .build(&table(), |_| {})
        .await;

    assert_eq!(report.selected, 2);
    assert_eq!(generator.calls(), vec![2, 3]);
}

#[tokio::test]
async fn one_failure_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let generator = FakeGenerator::failing(&[2]);
    let mut seen = Vec::new();

    let report = BatchBuilder::new(&generator, BuildOptions::new(dir.path()))
        .build(&table(), |outcome| seen.push((outcome.index, outcome.status)))
        .await;

    assert_eq!(generator.calls(), vec![1, 2, 3, 4]);
    assert_eq!(report.built, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(
        seen,
        vec![
            (1, OutcomeStatus::Built),
            (2, OutcomeStatus::Failed),
            (3, OutcomeStatus::Built),
            (4, OutcomeStatus::Built),
        ]
    );

    let failure = report.failures().next().unwrap();
    let message = failure.error.as_deref().unwrap();
    assert!(message.contains("#002"), "error should name the record: {message}");
    assert!(message.contains("LDL/HDL Ratio"));
    assert_eq!(count_files(dir.path()), 3);
}

#[tokio::test]
async fn failed_records_are_retried_on_the_next_run() {
    let dir = tempfile::tempdir().unwrap();
    let flaky = FakeGenerator::failing(&[3]);
    BatchBuilder::new(&flaky, BuildOptions::new(dir.path()))
        .build(&table(), |_| {})
        .await;

    let healthy = FakeGenerator::default();
    let report = BatchBuilder::new(&healthy, BuildOptions::new(dir.path()))
        .build(&table(), |_| {})
        .await;

    assert_eq!(healthy.calls(), vec![3]);
    assert_eq!(report.built, 1);
    assert_eq!(report.skipped, 3);
}

#[tokio::test]
async fn empty_existing_file_is_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let records = table();
    let path = records[0].key().path_in(dir.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "").unwrap();

    let generator = FakeGenerator::default();
    let options = BuildOptions {
        limit: Some(1),
        ..BuildOptions::new(dir.path())
    };
    BatchBuilder::new(&generator, options)
        .build(&records, |_| {})
        .await;

    assert_eq!(generator.calls(), vec![1]);
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[tokio::test]
async fn dry_run_reports_pending_without_generating() {
    let dir = tempfile::tempdir().unwrap();
    let records = table();
    let existing = records[1].key().path_in(dir.path());
    std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
    std::fs::write(&existing, "done").unwrap();

    let generator = FakeGenerator::default();
    let options = BuildOptions {
        dry_run: true,
        ..BuildOptions::new(dir.path())
    };
    let report = BatchBuilder::new(&generator, options)
        .build(&records, |_| {})
        .await;

    assert!(generator.calls().is_empty());
    assert_eq!(report.pending, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(count_files(dir.path()), 1);
}

#[test]
fn plan_needs_no_generator_and_honours_range() {
    let dir = tempfile::tempdir().unwrap();
    let records = table();
    let existing = records[2].key().path_in(dir.path());
    std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
    std::fs::write(&existing, "done").unwrap();

    let options = BuildOptions {
        start: 2,
        limit: Some(2),
        ..BuildOptions::new(dir.path())
    };
    let mut seen = Vec::new();
    let report = plan(&records, &options, |outcome| seen.push(outcome.index));

    assert_eq!(seen, vec![2, 3]);
    assert_eq!(report.selected, 2);
    let statuses: Vec<_> = report.outcomes.iter().map(|o| o.status).collect();
    assert_eq!(statuses, vec![OutcomeStatus::Pending, OutcomeStatus::Skipped]);
    assert_eq!(count_files(dir.path()), 1);
}

#[tokio::test]
async fn write_failure_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the "Liver" category directory should be.
    std::fs::write(dir.path().join("Liver"), "blocker").unwrap();

    let generator = FakeGenerator::default();
    let report = BatchBuilder::new(&generator, BuildOptions::new(dir.path()))
        .build(&table(), |_| {})
        .await;

    assert_eq!(report.failed, 1);
    assert_eq!(report.built, 3);
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.index, 4);
    assert!(failure.error.as_deref().unwrap().contains("failed to write"));
}

#[tokio::test]
async fn report_serializes_lowercase_status() {
    let dir = tempfile::tempdir().unwrap();
    let generator = FakeGenerator::failing(&[1]);
    let options = BuildOptions {
        limit: Some(1),
        ..BuildOptions::new(dir.path())
    };
    let report = BatchBuilder::new(&generator, options)
        .build(&table(), |_| {})
        .await;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["failed"], 1);
    assert_eq!(json["outcomes"][0]["status"], "failed");
    assert!(json["outcomes"][0]["error"].is_string());
}
