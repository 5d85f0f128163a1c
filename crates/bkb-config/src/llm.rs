//! Generative text service configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "https://api.moonshot.cn/v1".to_string()
}

fn default_model() -> String {
    "kimi-k2.5".to_string()
}

const fn default_temperature() -> f32 {
    1.0
}

const fn default_max_tokens() -> u32 {
    32_000
}

const fn default_timeout_secs() -> u64 {
    600
}

fn default_system_prompt() -> String {
    "你是 Kimi，由 Moonshot AI 提供的人工智能助手，你更擅长中文和英文的对话。\
     你会为用户提供安全，有帮助，准确的回答。\
     同时，你会拒绝一切涉及恐怖主义，种族歧视，黄色暴力等问题的回答。\
     Moonshot AI 为专有名词，不可翻译成其他语言。"
        .to_string()
}

fn default_prompt_template() -> String {
    "介绍一下 '{name_foreign}'（{name_local}）这个体检指标的涵义，以及常见的异常，\
     异常对应的可能原因，异常对应的建议后续处理（如调整生活方式，进一步详细检查等）。\
     使用 markdown 输出"
        .to_string()
}

/// OpenAI-compatible chat completion settings.
///
/// `api_key` is filled from `BKB_LLM__API_KEY` or `MOONSHOT_API_KEY`.
#[derive(Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: String,

    /// API root; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// User prompt with `{name_foreign}`, `{name_local}` and `{category}` placeholders.
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
            prompt_template: default_prompt_template(),
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl LlmConfig {
    /// Check if an API key is available.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Reject values the service would refuse anyway.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(invalid("llm.base_url", "must not be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(invalid("llm.model", "must not be empty"));
        }
        if self.max_tokens == 0 {
            return Err(invalid("llm.max_tokens", "must be greater than zero"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(invalid("llm.temperature", "must be between 0.0 and 2.0"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("llm.timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
