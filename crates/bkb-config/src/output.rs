//! Output directory configuration.

use serde::{Deserialize, Serialize};

fn default_dir() -> String {
    "docs/assets".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Root of the generated document tree (`{dir}/{category}/{filename}`).
    #[serde(default = "default_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}
