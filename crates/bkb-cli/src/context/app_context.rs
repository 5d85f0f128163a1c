use std::path::{Path, PathBuf};

use anyhow::Context;
use bkb_config::BkbConfig;
use bkb_core::BiomarkerRecord;

/// Loaded configuration plus the lookups every command shares.
///
/// Command-line paths take precedence over configured ones.
pub struct AppContext {
    pub config: BkbConfig,
}

impl AppContext {
    pub const fn new(config: BkbConfig) -> Self {
        Self { config }
    }

    /// Read the biomarker table in row order.
    pub fn load_records(&self, csv: Option<&Path>) -> anyhow::Result<Vec<BiomarkerRecord>> {
        let path = csv.map_or_else(|| PathBuf::from(&self.config.source.csv_path), Path::to_path_buf);
        let records = bkb_core::read_records(&path, &self.config.source.columns())
            .with_context(|| format!("failed to read biomarker table {}", path.display()))?;
        tracing::debug!(path = %path.display(), records = records.len(), "biomarker table loaded");
        Ok(records)
    }

    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir.map_or_else(|| PathBuf::from(&self.config.output.dir), Path::to_path_buf)
    }

    pub fn site_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir.map_or_else(|| PathBuf::from(&self.config.site.dir), Path::to_path_buf)
    }

    pub fn asset_prefix<'a>(&'a self, override_prefix: Option<&'a str>) -> &'a str {
        override_prefix.unwrap_or(&self.config.site.asset_prefix)
    }
}
