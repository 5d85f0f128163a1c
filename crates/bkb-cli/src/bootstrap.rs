use anyhow::Context;
use bkb_config::BkbConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration, then check it.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<BkbConfig> {
    let config_file = flags.config.as_deref();

    let config = BkbConfig::load_with_dotenv(config_file).with_context(|| match config_file {
        Some(path) => format!("failed to load configuration from {}", path.display()),
        None => "failed to load configuration".to_string(),
    })?;

    config.validate().context("invalid configuration")?;
    Ok(config)
}
