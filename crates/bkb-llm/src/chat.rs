//! OpenAI-compatible chat completion generator.

use std::time::Duration;

use bkb_config::LlmConfig;
use bkb_core::BiomarkerRecord;
use serde::{Deserialize, Serialize};

use crate::DocumentGenerator;
use crate::error::GenerationError;
use crate::http::check_response;
use crate::prompt::render_prompt;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Generates one document per request via `POST {base_url}/chat/completions`.
pub struct ChatCompletionGenerator {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    system_prompt: String,
    prompt_template: String,
}

impl ChatCompletionGenerator {
    /// Build a generator from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingApiKey`] when no key is configured, or
    /// [`GenerationError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, GenerationError> {
        if !config.is_configured() {
            return Err(GenerationError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("biomarker-kb/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            system_prompt: config.system_prompt.clone(),
            prompt_template: config.prompt_template.clone(),
        })
    }

    /// The full URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DocumentGenerator for ChatCompletionGenerator {
    async fn generate(&self, record: &BiomarkerRecord) -> Result<String, GenerationError> {
        let prompt = render_prompt(&self.prompt_template, record);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, index = record.index, "sending chat completion");

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let text = resp.text().await?;

        extract_content(&text)
    }
}

/// Pull the first choice's message text out of a response body.
fn extract_content(body: &str) -> Result<String, GenerationError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Parse(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(GenerationError::EmptyResponse)?;

    if choice.finish_reason.as_deref() == Some("length") {
        tracing::warn!("chat completion stopped at max_tokens; document may be truncated");
    }

    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(GenerationError::EmptyResponse),
    }
}
