//! Reasoning service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Reasoning service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the OpenAI-compatible endpoint
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for question generation, in seconds
    #[serde(default = "default_question_timeout")]
    pub question_timeout_secs: u64,

    /// Timeout for per-answer evaluation, in seconds
    #[serde(default = "default_evaluation_timeout")]
    pub evaluation_timeout_secs: u64,

    /// Timeout for report synthesis, in seconds. Larger than the
    /// per-answer timeout because the input is a full transcript.
    #[serde(default = "default_report_timeout")]
    pub report_timeout_secs: u64,
}

impl AiConfig {
    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Question-generation deadline as a Duration
    pub fn question_timeout(&self) -> Duration {
        Duration::from_secs(self.question_timeout_secs)
    }

    /// Per-answer evaluation deadline as a Duration
    pub fn evaluation_timeout(&self) -> Duration {
        Duration::from_secs(self.evaluation_timeout_secs)
    }

    /// Report-synthesis deadline as a Duration
    pub fn report_timeout(&self) -> Duration {
        Duration::from_secs(self.report_timeout_secs)
    }

    /// Validate reasoning configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI_API_KEY"));
        }
        for timeout in [
            self.question_timeout_secs,
            self.evaluation_timeout_secs,
            self.report_timeout_secs,
        ] {
            if timeout == 0 || timeout > 300 {
                return Err(ValidationError::InvalidReasoningTimeout);
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            question_timeout_secs: default_question_timeout(),
            evaluation_timeout_secs: default_evaluation_timeout(),
            report_timeout_secs: default_report_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_question_timeout() -> u64 {
    30
}

fn default_evaluation_timeout() -> u64 {
    20
}

fn default_report_timeout() -> u64 {
    60
}
