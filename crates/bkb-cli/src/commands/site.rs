use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SiteArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bkb site`.
pub fn handle(args: &SiteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = ctx.load_records(args.source.csv.as_deref())?;
    let site_dir = ctx.site_dir(args.site_dir.as_deref());
    let prefix = ctx.asset_prefix(args.asset_prefix.as_deref());

    let files = bkb_site::write_site(&site_dir, &records, prefix)
        .with_context(|| format!("failed to write site to {}", site_dir.display()))?;

    output(&files, flags.format)
}
