use bkb_builder::scan_status;

use crate::cli::root_commands::StatusArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `bkb status`.
pub fn handle(args: &StatusArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = ctx.load_records(args.source.csv.as_deref())?;
    let output_dir = ctx.output_dir(args.output_dir.as_deref());
    let report = scan_status(&records, &output_dir);

    tracing::info!(
        total = report.total,
        built = report.built,
        orphans = report.orphans.len(),
        output_dir = %output_dir.display(),
        "status"
    );
    for orphan in &report.orphans {
        tracing::warn!(path = %orphan, "document has no matching record");
    }

    match flags.format {
        OutputFormat::Table => output(&report.categories, flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format),
    }
}
