//! Status handling for chat completion responses.

use serde::Deserialize;

use crate::error::GenerationError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// `{"error": {"message": ...}}`, as returned by OpenAI-compatible services.
#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Pass a successful response through, or map its status to an error.
///
/// 429 becomes [`GenerationError::RateLimited`]; any other failure becomes
/// [`GenerationError::Api`] carrying the service's error message when the body
/// has one, else the raw body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, GenerationError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    tracing::debug!(status = status.as_u16(), "chat completion request rejected");

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GenerationError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    Err(GenerationError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map_or_else(|_| body.trim().to_string(), |parsed| parsed.error.message)
}

/// `Retry-After` in whole seconds. HTTP-date values fall back to the default.
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
