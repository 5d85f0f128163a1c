use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Build(args) => commands::build::handle(&args, ctx, flags).await,
        Commands::Site(args) => commands::site::handle(&args, ctx, flags),
        Commands::Serve(args) => commands::serve::handle(&args, ctx).await,
        Commands::Search(args) => commands::search::handle(&args, ctx, flags),
        Commands::Show(args) => commands::show::handle(&args, ctx, flags),
        Commands::Status(args) => commands::status::handle(&args, ctx, flags),
        Commands::Config => commands::config::handle(ctx, flags),
    }
}
