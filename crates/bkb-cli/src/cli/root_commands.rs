use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Generate missing documents for the biomarker table.
    Build(BuildArgs),
    /// Write the static browsing page and its index.
    Site(SiteArgs),
    /// Serve the site and generated documents locally.
    Serve(ServeArgs),
    /// Find biomarkers by English or Chinese name.
    Search(SearchArgs),
    /// Print the generated document for one record.
    Show(ShowArgs),
    /// Report built and missing documents per category.
    Status(StatusArgs),
    /// Print the effective configuration.
    Config,
}

/// Where the biomarker table is read from.
#[derive(Clone, Debug, Default, Args)]
pub struct SourceArgs {
    /// Biomarker CSV (defaults to `source.csv_path`)
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct BuildArgs {
    /// Process at most N records of the selected range
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// First record index to process (1-based)
    #[arg(long, value_name = "N")]
    pub start: Option<u32>,

    /// Destination for generated documents (defaults to `output.dir`)
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Report what would be generated without calling the model
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Clone, Debug, Args)]
pub struct SiteArgs {
    /// Directory receiving index.html and index.json (defaults to `site.dir`)
    #[arg(long, value_name = "PATH")]
    pub site_dir: Option<PathBuf>,

    /// Document URL prefix relative to the site directory
    #[arg(long, value_name = "PREFIX")]
    pub asset_prefix: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address (defaults to `site.bind`)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    #[arg(long, value_name = "PATH")]
    pub site_dir: Option<PathBuf>,

    /// Generated documents served under the asset prefix
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive substring of either name
    pub query: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Record index as listed in the table
    pub index: u32,

    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Clone, Debug, Args)]
pub struct StatusArgs {
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}
