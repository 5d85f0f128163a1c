use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

const REDACTED: &str = "<redacted>";

/// Handle `bkb config`: the merged configuration, API key hidden.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut shown = ctx.config.clone();
    if !shown.llm.api_key.is_empty() {
        shown.llm.api_key = REDACTED.to_string();
    }

    match flags.format {
        OutputFormat::Table => {
            print!("{}", toml::to_string_pretty(&shown)?);
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(&shown, flags.format),
    }
}
