use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};
pub use root_commands::Commands;

/// Top-level CLI parser for the `bkb` binary.
#[derive(Debug, Parser)]
#[command(
    name = "bkb",
    version,
    about = "Biomarker knowledge base: generate, browse, and serve indicator documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Config file used instead of ./bkb.toml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Colorize table output
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Show a progress bar during builds
    #[arg(long, global = true, default_value = "auto")]
    pub progress: ProgressMode,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
            color: self.color,
            progress: self.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_without_flags_processes_everything() {
        let cli = Cli::try_parse_from(["bkb", "build"]).expect("cli should parse");
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.start, None);
        assert_eq!(args.limit, None);
        assert_eq!(args.output_dir, None);
        assert!(!args.dry_run);
    }

    #[test]
    fn build_flags_parse() {
        let cli = Cli::try_parse_from([
            "bkb",
            "build",
            "--start",
            "12",
            "--limit",
            "5",
            "--output-dir",
            "out",
            "--csv",
            "table.csv",
            "--dry-run",
        ])
        .expect("cli should parse");
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.start, Some(12));
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.output_dir.as_deref(), Some(Path::new("out")));
        assert_eq!(args.source.csv.as_deref(), Some(Path::new("table.csv")));
        assert!(args.dry_run);
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["bkb", "--format", "json", "status", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Status(_)));

        let flags = Cli::try_parse_from(["bkb", "config", "-c", "alt.toml"])
            .expect("cli should parse")
            .global_flags();
        assert_eq!(flags.config.as_deref(), Some(Path::new("alt.toml")));
    }

    #[test]
    fn show_requires_numeric_index() {
        assert!(Cli::try_parse_from(["bkb", "show", "albumin"]).is_err());
        let cli = Cli::try_parse_from(["bkb", "show", "7"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Show(ref args) if args.index == 7));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["bkb", "-q", "-v", "status"]).is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["bkb", "--format", "xml", "status"]).is_err());
    }
}
