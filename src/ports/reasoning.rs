//! Reasoning service port.
//!
//! Interface to the external text-completion dependency that generates
//! question sets, per-answer evaluations, and reports from prompts. The
//! service is treated as an untyped, occasionally malformed, occasionally
//! slow black box: it returns raw text that is merely *expected* to be
//! JSON. Callers apply a bounded timeout per call and never retry
//! automatically on the hot request path.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::interview::InterviewError;

/// Port for reasoning/completion calls.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Sends a prompt and returns the raw response text.
    ///
    /// Single-shot: implementations must not retry internally, because
    /// callers guard duplicate side effects via idempotency checks, not
    /// locks.
    async fn complete(&self, request: ReasoningRequest) -> Result<String, ReasoningError>;
}

/// What a completion is for. Drives timeout selection and tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasoningPurpose {
    QuestionGeneration,
    AnswerEvaluation,
    /// Report synthesis processes a full transcript and tolerates a
    /// longer timeout than the per-answer path.
    ReportSynthesis,
}

impl ReasoningPurpose {
    /// Label used in logs and request metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningPurpose::QuestionGeneration => "question_generation",
            ReasoningPurpose::AnswerEvaluation => "answer_evaluation",
            ReasoningPurpose::ReportSynthesis => "report_synthesis",
        }
    }
}

/// A single completion request.
#[derive(Debug, Clone)]
pub struct ReasoningRequest {
    /// The assembled prompt.
    pub prompt: String,
    /// Optional system instruction.
    pub system: Option<String>,
    /// Generation budget.
    pub max_tokens: u32,
    /// Hard deadline for this call.
    pub timeout: Duration,
    /// What the completion is for.
    pub purpose: ReasoningPurpose,
}

impl ReasoningRequest {
    /// Creates a request with the default budget and a 30s timeout.
    pub fn new(prompt: impl Into<String>, purpose: ReasoningPurpose) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_tokens: 2_048,
            timeout: Duration::from_secs(30),
            purpose,
        }
    }

    /// Sets the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the generation budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reasoning service errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReasoningError {
    /// Request exceeded its deadline.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Service is unreachable or returned a server error.
    #[error("reasoning service unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Rate limited by the service.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The request itself was rejected as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ReasoningError {
    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u32) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Returns true if a *later* attempt could plausibly succeed.
    ///
    /// Informational only: callers surface the failure rather than
    /// retrying within the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReasoningError::Timeout { .. }
                | ReasoningError::Unavailable { .. }
                | ReasoningError::RateLimited { .. }
        )
    }
}

impl From<ReasoningError> for InterviewError {
    fn from(err: ReasoningError) -> Self {
        InterviewError::upstream_unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_works() {
        let request = ReasoningRequest::new("evaluate this", ReasoningPurpose::AnswerEvaluation)
            .with_system("You are an interview evaluator.")
            .with_max_tokens(512)
            .with_timeout(Duration::from_secs(20));

        assert_eq!(request.prompt, "evaluate this");
        assert_eq!(
            request.system.as_deref(),
            Some("You are an interview evaluator.")
        );
        assert_eq!(request.max_tokens, 512);
        assert_eq!(request.timeout, Duration::from_secs(20));
        assert_eq!(request.purpose, ReasoningPurpose::AnswerEvaluation);
    }

    #[test]
    fn retryable_classification() {
        assert!(ReasoningError::timeout(30).is_retryable());
        assert!(ReasoningError::unavailable("down").is_retryable());
        assert!(ReasoningError::rate_limited(10).is_retryable());
        assert!(!ReasoningError::AuthenticationFailed.is_retryable());
        assert!(!ReasoningError::InvalidRequest("bad".into()).is_retryable());
    }

    #[test]
    fn converts_to_upstream_unavailable() {
        let err: InterviewError = ReasoningError::timeout(30).into();
        assert!(matches!(err, InterviewError::UpstreamUnavailable { .. }));
    }

    #[test]
    fn purpose_labels_are_stable() {
        assert_eq!(
            ReasoningPurpose::ReportSynthesis.as_str(),
            "report_synthesis"
        );
    }
}
