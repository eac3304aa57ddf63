//! Anthropic Messages adapter behind the `BulletRewriter` trait.
//!
//! Only `grounding::rewrite` talks to it, and nothing it returns is used until
//! the verifier has audited it. Transient failures (429, 5xx, transport) are
//! retried here with exponential backoff; everything else surfaces as `LlmError`.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
/// Pinned so rewrite behavior does not drift between deployments.
pub const MODEL: &str = "claude-sonnet-4-5";
/// One bullet per call.
const MAX_TOKENS: u32 = 512;
const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl MessagesResponse {
    /// First text block, if any.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .filter(|b| b.kind == "text")
            .find_map(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Outcome of a single HTTP attempt.
enum Attempt {
    Done(MessagesResponse),
    Retry(LlmError),
    Fatal(LlmError),
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, api_key })
    }

    async fn attempt(&self, body: &MessagesRequest<'_>) -> Attempt {
        let response = match self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Attempt::Retry(LlmError::Http(e)),
        };

        let status = response.status();
        if status.is_success() {
            return match response.json::<MessagesResponse>().await {
                Ok(parsed) => Attempt::Done(parsed),
                Err(e) => Attempt::Fatal(LlmError::Http(e)),
            };
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&raw)
            .map(|e| e.error.message)
            .unwrap_or(raw);
        let error = LlmError::Api {
            status: status.as_u16(),
            message,
        };
        if is_retryable(status) {
            Attempt::Retry(error)
        } else {
            Attempt::Fatal(error)
        }
    }

    /// Sends one prompt, retrying transient failures up to `MAX_ATTEMPTS` times.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<MessagesResponse, LlmError> {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error = None;
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "LLM attempt {attempt}/{MAX_ATTEMPTS} failed: {}; retrying in {}ms",
                    last_error
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.attempt(&body).await {
                Attempt::Done(response) => {
                    debug!(
                        "LLM call ok: input_tokens={}, output_tokens={}",
                        response.usage.input_tokens, response.usage.output_tokens
                    );
                    return Ok(response);
                }
                Attempt::Fatal(e) => return Err(e),
                Attempt::Retry(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or(LlmError::RetriesExhausted {
            attempts: MAX_ATTEMPTS,
        }))
    }

    /// Calls the LLM and returns its text answer with any code fences removed.
    pub async fn call_text(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        let text = strip_code_fences(response.text().ok_or(LlmError::EmptyContent)?);
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (1 << attempt.saturating_sub(1)))
}

/// Strips a surrounding ``` fence (with or without a language tag).
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening fence line.
    let body = match stripped.find('\n') {
        Some(newline) if !stripped[..newline].trim().contains(' ') => &stripped[newline + 1..],
        _ => stripped,
    };
    body.trim().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences_with_tag() {
        let input = "```text\nBuilt the billing service\n```";
        assert_eq!(strip_code_fences(input), "Built the billing service");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\nBuilt the billing service\n```";
        assert_eq!(strip_code_fences(input), "Built the billing service");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        assert_eq!(strip_code_fences("  Built it  "), "Built it");
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_response_text_picks_first_text_block() {
        let json = r#"{
            "content": [{"type": "tool_use"}, {"type": "text", "text": "Shipped it"}],
            "usage": {"input_tokens": 10, "output_tokens": 3}
        }"#;
        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("Shipped it"));
    }
}
