use anyhow::Context;
use bkb_site::{ServeOptions, StaticServer};

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `bkb serve`. Runs until interrupted.
pub async fn handle(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let options = ServeOptions {
        site_dir: ctx.site_dir(args.site_dir.as_deref()),
        assets_dir: ctx.output_dir(args.output_dir.as_deref()),
        asset_prefix: ctx.config.site.asset_prefix.clone(),
        bind: args.bind.clone().unwrap_or_else(|| ctx.config.site.bind.clone()),
    };

    if !options.site_dir.join(bkb_site::INDEX_HTML_FILE).is_file() {
        tracing::warn!(
            site_dir = %options.site_dir.display(),
            "no index.html yet; run `bkb site` first"
        );
    }

    let server = StaticServer::bind(options.clone())?;
    let addr = server
        .local_addr()
        .map_or_else(|| options.bind.clone(), |addr| addr.to_string());
    tracing::info!(
        site_dir = %options.site_dir.display(),
        assets_dir = %options.assets_dir.display(),
        "serving http://{addr}/"
    );

    tokio::task::spawn_blocking(move || server.run())
        .await
        .context("server thread panicked")
}
