//! The batch builder loop.

use std::path::PathBuf;

use bkb_core::BiomarkerRecord;
use bkb_llm::DocumentGenerator;
use serde::Serialize;

use crate::error::BuildError;
use crate::fs::{is_built, write_atomic};

/// Which records a run covers and where documents go.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub output_dir: PathBuf,
    /// First record index to process (1-based, matched against `record.index`).
    pub start: u32,
    /// Maximum number of records in the selected range.
    pub limit: Option<usize>,
    /// Report what would be generated without calling the generator; see [`plan`].
    pub dry_run: bool,
}

impl BuildOptions {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            start: 1,
            limit: None,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Built,
    Skipped,
    Failed,
    /// Would be generated; only produced by dry runs.
    Pending,
}

/// What happened to one record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub index: u32,
    pub category: String,
    pub name_foreign: String,
    pub name_local: String,
    pub path: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecordOutcome {
    fn new(
        record: &BiomarkerRecord,
        path: &std::path::Path,
        status: OutcomeStatus,
        error: Option<String>,
    ) -> Self {
        Self {
            index: record.index,
            category: record.category.clone(),
            name_foreign: record.name_foreign.clone(),
            name_local: record.name_local.clone(),
            path: path.display().to_string(),
            status,
            error,
        }
    }
}

/// Summary of one build run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub selected: usize,
    pub built: usize,
    pub skipped: usize,
    pub failed: usize,
    pub pending: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl BuildReport {
    fn record(&mut self, outcome: RecordOutcome) {
        match outcome.status {
            OutcomeStatus::Built => self.built += 1,
            OutcomeStatus::Skipped => self.skipped += 1,
            OutcomeStatus::Failed => self.failed += 1,
            OutcomeStatus::Pending => self.pending += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == OutcomeStatus::Failed)
    }
}

/// Records with `index >= start`, in table order, capped at `limit`.
#[must_use]
pub fn select_range(
    records: &[BiomarkerRecord],
    start: u32,
    limit: Option<usize>,
) -> Vec<&BiomarkerRecord> {
    records
        .iter()
        .filter(|record| record.index >= start)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Report what a build with `options` would do, without generating anything.
///
/// Records whose document already exists are `Skipped`; the rest are
/// `Pending`. Nothing is written and no generator is needed.
pub fn plan<F>(records: &[BiomarkerRecord], options: &BuildOptions, mut on_outcome: F) -> BuildReport
where
    F: FnMut(&RecordOutcome),
{
    let selected = select_range(records, options.start, options.limit);
    let mut report = BuildReport {
        selected: selected.len(),
        ..BuildReport::default()
    };

    for record in selected {
        let path = record.key().path_in(&options.output_dir);
        let status = if is_built(&path) {
            OutcomeStatus::Skipped
        } else {
            OutcomeStatus::Pending
        };
        let outcome = RecordOutcome::new(record, &path, status, None);
        on_outcome(&outcome);
        report.record(outcome);
    }

    tracing::info!(
        selected = report.selected,
        skipped = report.skipped,
        pending = report.pending,
        "build planned"
    );
    report
}

/// Drives records through the generator into the output tree, one at a time.
pub struct BatchBuilder<G> {
    generator: G,
    options: BuildOptions,
}

impl<G: DocumentGenerator> BatchBuilder<G> {
    pub const fn new(generator: G, options: BuildOptions) -> Self {
        Self { generator, options }
    }

    pub const fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build every selected record, in order.
    ///
    /// Existing non-empty documents are skipped. A failure is recorded on the
    /// report and the loop moves on to the next record. `on_outcome` is called
    /// after each record.
    pub async fn build<F>(&self, records: &[BiomarkerRecord], mut on_outcome: F) -> BuildReport
    where
        F: FnMut(&RecordOutcome),
    {
        if self.options.dry_run {
            return plan(records, &self.options, on_outcome);
        }

        let selected = select_range(records, self.options.start, self.options.limit);
        let mut report = BuildReport {
            selected: selected.len(),
            ..BuildReport::default()
        };

        tracing::info!(
            selected = selected.len(),
            start = self.options.start,
            output_dir = %self.options.output_dir.display(),
            "starting build"
        );

        for record in selected {
            let outcome = self.build_one(record).await;
            on_outcome(&outcome);
            report.record(outcome);
        }

        tracing::info!(
            built = report.built,
            skipped = report.skipped,
            failed = report.failed,
            "build finished"
        );
        report
    }

    async fn build_one(&self, record: &BiomarkerRecord) -> RecordOutcome {
        let path = record.key().path_in(&self.options.output_dir);
        let outcome = |status, error| RecordOutcome::new(record, &path, status, error);

        if is_built(&path) {
            tracing::info!(index = record.index, path = %path.display(), "already built, skipping");
            return outcome(OutcomeStatus::Skipped, None);
        }

        match self.generate_and_write(record, &path).await {
            Ok(()) => {
                tracing::info!(index = record.index, path = %path.display(), "document written");
                outcome(OutcomeStatus::Built, None)
            }
            Err(error) => {
                tracing::warn!(index = record.index, %error, "record failed, continuing");
                outcome(OutcomeStatus::Failed, Some(error.to_string()))
            }
        }
    }

    async fn generate_and_write(
        &self,
        record: &BiomarkerRecord,
        path: &std::path::Path,
    ) -> Result<(), BuildError> {
        let text = self
            .generator
            .generate(record)
            .await
            .map_err(|source| BuildError::Generation {
                label: record.label(),
                source,
            })?;

        write_atomic(path, &text).map_err(|source| BuildError::Write {
            label: record.label(),
            path: path.to_path_buf(),
            source,
        })
    }
}
