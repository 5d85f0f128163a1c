//! Static site emission: `index.html` plus `index.json`.

use std::path::{Path, PathBuf};

use bkb_core::BiomarkerRecord;
use serde::Serialize;

use crate::catalog::SiteIndex;
use crate::error::SiteError;

/// The browsing page. Loads `index.json`, fetches documents by their
/// precomputed `url`, and unwraps document fences before rendering.
pub const INDEX_HTML: &str = include_str!("../assets/index.html");

pub const INDEX_JSON_FILE: &str = "index.json";
pub const INDEX_HTML_FILE: &str = "index.html";

/// What [`write_site`] produced.
#[derive(Debug, Clone, Serialize)]
pub struct SiteFiles {
    pub index_json: PathBuf,
    pub index_html: PathBuf,
    pub categories: usize,
    pub entries: usize,
}

/// Write the page and its index into `site_dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`SiteError::Io`] if the directory or either file cannot be
/// written, or [`SiteError::Json`] if the index cannot be encoded.
pub fn write_site(
    site_dir: &Path,
    records: &[BiomarkerRecord],
    asset_prefix: &str,
) -> Result<SiteFiles, SiteError> {
    let index = SiteIndex::new(records, asset_prefix);

    std::fs::create_dir_all(site_dir).map_err(|source| SiteError::Io {
        path: site_dir.to_path_buf(),
        source,
    })?;

    let index_json = site_dir.join(INDEX_JSON_FILE);
    let json = serde_json::to_string_pretty(&index)?;
    write_file(&index_json, &json)?;

    let index_html = site_dir.join(INDEX_HTML_FILE);
    write_file(&index_html, INDEX_HTML)?;

    tracing::info!(
        site_dir = %site_dir.display(),
        entries = index.total,
        "static site written"
    );

    Ok(SiteFiles {
        index_json,
        index_html,
        categories: index.categories.groups().len(),
        entries: index.total,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    std::fs::write(path, contents).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
