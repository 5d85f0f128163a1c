use anyhow::Context;
use bkb_builder::{BatchBuilder, BuildOptions, BuildReport, RecordOutcome, plan, select_range};
use bkb_core::BiomarkerRecord;
use bkb_llm::{ChatCompletionGenerator, DocumentGenerator};

use crate::cli::root_commands::BuildArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `bkb build`.
///
/// Per-record failures are reported, not returned: the command succeeds once
/// every selected record has been attempted.
pub async fn handle(args: &BuildArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = ctx.load_records(args.source.csv.as_deref())?;

    let mut options = BuildOptions::new(ctx.output_dir(args.output_dir.as_deref()));
    options.start = args.start.unwrap_or(1);
    options.limit = args.limit;
    options.dry_run = args.dry_run;

    let report = if options.dry_run {
        let progress = progress_for(&records, &options);
        let report = plan(&records, &options, |outcome| advance(&progress, outcome));
        finish(&progress, &report);
        report
    } else {
        let llm = ctx
            .config
            .require_llm()
            .context("set BKB_LLM__API_KEY or MOONSHOT_API_KEY to generate documents")?;
        let generator =
            ChatCompletionGenerator::new(llm).context("failed to set up the model client")?;
        tracing::debug!(endpoint = generator.endpoint(), model = %llm.model, "using model");
        run(BatchBuilder::new(generator, options), &records).await
    };

    for failure in report.failures() {
        if let Some(error) = &failure.error {
            eprintln!("failed #{:03} {}: {error}", failure.index, failure.name_foreign);
        }
    }

    match flags.format {
        OutputFormat::Table => output(&report.outcomes, flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format),
    }
}

async fn run<G: DocumentGenerator>(builder: BatchBuilder<G>, records: &[BiomarkerRecord]) -> BuildReport {
    let progress = progress_for(records, builder.options());
    let report = builder
        .build(records, |outcome| advance(&progress, outcome))
        .await;
    finish(&progress, &report);
    report
}

fn progress_for(records: &[BiomarkerRecord], options: &BuildOptions) -> Progress {
    let selected = select_range(records, options.start, options.limit).len();
    Progress::bar(u64::try_from(selected).unwrap_or(u64::MAX), "generating")
}

fn advance(progress: &Progress, outcome: &RecordOutcome) {
    progress.advance(&format!("#{:03} {}", outcome.index, outcome.name_foreign));
}

fn finish(progress: &Progress, report: &BuildReport) {
    let summary = format!(
        "{} built, {} skipped, {} failed, {} pending",
        report.built, report.skipped, report.failed, report.pending
    );
    if report.failed > 0 {
        progress.finish_err(&summary);
    } else {
        progress.finish_ok(&summary);
    }
}

#[cfg(test)]
mod tests {
    use bkb_builder::OutcomeStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dry_run_plan_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            BiomarkerRecord::new(1, "Liver", "ALT", "谷丙转氨酶"),
            BiomarkerRecord::new(2, "Liver", "AST", "谷草转氨酶"),
        ];
        let mut options = BuildOptions::new(dir.path());
        options.dry_run = true;

        let progress = progress_for(&records, &options);
        let report = plan(&records, &options, |outcome| advance(&progress, outcome));
        assert_eq!(report.pending, 2);
        assert!(report.outcomes.iter().all(|o| o.status == OutcomeStatus::Pending));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
