//! # bkb-config
//!
//! Layered configuration loading for `biomarker-kb` using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BKB_*` prefix, `__` as separator)
//! 2. `MOONSHOT_API_KEY`, mapped onto `llm.api_key`
//! 3. Project-level `bkb.toml` (or the file passed with `--config`)
//! 4. User-level `~/.config/bkb/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `BKB_LLM__MODEL` -> `llm.model`, `BKB_OUTPUT__DIR` -> `output.dir`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use bkb_config::BkbConfig;
//!
//! let config = BkbConfig::load_with_dotenv(None).expect("config");
//! if config.llm.is_configured() {
//!     println!("model: {}", config.llm.model);
//! }
//! ```

mod error;
mod llm;
mod output;
mod site;
mod source;

pub use error::ConfigError;
pub use llm::LlmConfig;
pub use output::OutputConfig;
pub use site::SiteConfig;
pub use source::SourceConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Provider-specific variable also accepted for the API key.
pub const LEGACY_API_KEY_VAR: &str = "MOONSHOT_API_KEY";

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "bkb.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BkbConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

impl BkbConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(config_file).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the directory of `config_file` (when given), otherwise
    /// from the current directory, then builds the figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_dotenv(config_file);
        Self::load(config_file)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config (explicit file must exist)
        match config_file {
            Some(path) => figment = figment.merge(Toml::file_exact(path)),
            None => {
                let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Legacy API key variable
        figment = figment.merge(
            Env::raw()
                .only(&[LEGACY_API_KEY_VAR])
                .map(|_| "llm.api_key".into()),
        );

        // Layer 4: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("BKB_").split("__"));

        figment
    }

    /// Validate cross-field constraints after loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.llm.validate()?;
        if self.output.dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output.dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Fail with [`ConfigError::NotConfigured`] unless an API key is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the `llm` section.
    pub fn require_llm(&self) -> Result<&LlmConfig, ConfigError> {
        if self.llm.is_configured() {
            Ok(&self.llm)
        } else {
            Err(ConfigError::NotConfigured {
                section: "llm".to_string(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bkb").join("config.toml"))
    }

    /// Load `.env` next to the config file, falling back to the current directory.
    ///
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv(config_file: Option<&Path>) {
        if let Some(dir) = config_file.and_then(Path::parent) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }

        let _ = dotenvy::dotenv();
    }
}
