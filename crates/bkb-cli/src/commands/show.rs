use anyhow::Context;
use bkb_site::{Catalog, DocumentStore};
use serde::Serialize;

use crate::cli::root_commands::ShowArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ShowResponse<'a> {
    index: u32,
    category: &'a str,
    name_foreign: &'a str,
    name_local: &'a str,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Handle `bkb show`.
///
/// A document that cannot be read is reported in place of its text; only an
/// unknown index is an error.
pub fn handle(args: &ShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = ctx.load_records(args.source.csv.as_deref())?;
    let catalog = Catalog::from_records(&records, ctx.asset_prefix(None));
    let (category, entry) = catalog
        .find(args.index)
        .with_context(|| format!("no biomarker with index {}", args.index))?;

    let key = Catalog::key_of(category, entry);
    let store = DocumentStore::new(ctx.output_dir(args.output_dir.as_deref()));
    let fetched = store.fetch_rendered(&key);

    if flags.format == OutputFormat::Json {
        let (content, error) = match fetched {
            Ok(text) => (Some(text), None),
            Err(error) => (None, Some(error.to_string())),
        };
        return output(
            &ShowResponse {
                index: entry.index,
                category,
                name_foreign: &entry.name_foreign,
                name_local: &entry.name_local,
                path: key.path_in(store.root()).display().to_string(),
                content,
                error,
            },
            flags.format,
        );
    }

    match fetched {
        Ok(text) => println!("{text}"),
        Err(error) => println!(
            "#{:03} {} ({}): {error}",
            entry.index, entry.name_foreign, entry.name_local
        ),
    }
    Ok(())
}
