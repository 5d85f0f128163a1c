//! Static site configuration.

use serde::{Deserialize, Serialize};

fn default_dir() -> String {
    "docs".to_string()
}

fn default_asset_prefix() -> String {
    "assets".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Directory that receives `index.html` and `index.json`.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// URL prefix of the document tree, relative to the page.
    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,

    /// Listen address for `bkb serve`.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            asset_prefix: default_asset_prefix(),
            bind: default_bind(),
        }
    }
}
