//! OpenAI-compatible reasoning service adapter.
//!
//! Talks to any chat-completions endpoint that speaks the OpenAI wire
//! format. Non-streaming only: the callers of this port need a single raw
//! text body to hand to the normalizer, and they apply a per-call
//! deadline via [`ReasoningRequest::timeout`].

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{ReasoningError, ReasoningRequest, ReasoningService};

/// Configuration for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model identifier.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
}

impl OpenAiConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
        }
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible reasoning service.
pub struct OpenAiReasoningService {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiReasoningService {
    /// Creates a provider with the given configuration.
    ///
    /// The client carries no global timeout; each call applies the
    /// deadline from its request.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    fn to_wire_request(&self, request: &ReasoningRequest) -> ChatCompletionRequest {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: 0.2,
        }
    }

    fn map_send_error(err: reqwest::Error, timeout: Duration) -> ReasoningError {
        if err.is_timeout() {
            ReasoningError::timeout(timeout.as_secs() as u32)
        } else if err.is_connect() {
            ReasoningError::unavailable(format!("Connection failed: {}", err))
        } else {
            ReasoningError::unavailable(err.to_string())
        }
    }
}

#[async_trait]
impl ReasoningService for OpenAiReasoningService {
    async fn complete(&self, request: ReasoningRequest) -> Result<String, ReasoningError> {
        let wire_request = self.to_wire_request(&request);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .timeout(request.timeout)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| Self::map_send_error(e, request.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => ReasoningError::AuthenticationFailed,
                429 => ReasoningError::rate_limited(parse_retry_after(&error_body)),
                400..=499 => ReasoningError::InvalidRequest(error_body),
                _ => ReasoningError::unavailable(format!(
                    "Server error {}: {}",
                    status, error_body
                )),
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ReasoningError::unavailable(format!("Malformed response body: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ReasoningError::unavailable("Response contained no choices"))
    }
}

/// Pulls a retry hint out of an error body, defaulting to 30s.
fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .and_then(extract_retry_secs)
        })
        .unwrap_or(30)
}

fn extract_retry_secs(message: &str) -> Option<u32> {
    let idx = message.find("try again in ")?;
    let rest = &message[idx + 13..];
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ReasoningPurpose;

    #[test]
    fn wire_request_includes_system_first() {
        let service = OpenAiReasoningService::new(OpenAiConfig::new("sk-test"));
        let request = ReasoningRequest::new("prompt", ReasoningPurpose::QuestionGeneration)
            .with_system("be terse");
        let wire = service.to_wire_request(&request);
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].content, "prompt");
    }

    #[test]
    fn wire_request_without_system_has_single_message() {
        let service = OpenAiReasoningService::new(OpenAiConfig::new("sk-test"));
        let request = ReasoningRequest::new("prompt", ReasoningPurpose::QuestionGeneration);
        let wire = service.to_wire_request(&request);
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.messages[0].role, "user");
    }

    #[test]
    fn retry_after_parses_hint() {
        let body = r#"{"error": {"message": "Rate limit reached, try again in 12s."}}"#;
        assert_eq!(parse_retry_after(body), 12);
    }

    #[test]
    fn retry_after_defaults_without_hint() {
        assert_eq!(parse_retry_after("not json"), 30);
        assert_eq!(parse_retry_after(r#"{"error": {"message": "slow down"}}"#), 30);
    }

    #[test]
    fn completions_url_appends_path() {
        let service = OpenAiReasoningService::new(
            OpenAiConfig::new("sk-test").with_base_url("https://llm.internal"),
        );
        assert_eq!(
            service.completions_url(),
            "https://llm.internal/v1/chat/completions"
        );
    }

    #[test]
    fn response_body_deserializes() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "{}"}}]}"#;
        let body: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.choices[0].message.content, "{}");
    }
}
