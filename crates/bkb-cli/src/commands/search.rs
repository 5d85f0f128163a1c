use bkb_site::Catalog;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    index: u32,
    category: &'a str,
    name_foreign: &'a str,
    name_local: &'a str,
    path: &'a str,
}

/// Handle `bkb search`.
pub fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = ctx.load_records(args.source.csv.as_deref())?;
    let catalog = Catalog::from_records(&records, ctx.asset_prefix(None));
    let matches = catalog.search(&args.query);

    let hits = matches
        .groups()
        .iter()
        .flat_map(|group| {
            group.entries.iter().map(|entry| SearchHit {
                index: entry.index,
                category: &group.category,
                name_foreign: &entry.name_foreign,
                name_local: &entry.name_local,
                path: &entry.path,
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(query = %args.query, hits = hits.len(), "search finished");
    output(&hits, flags.format)
}
