//! Interview-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Maximum characters of raw upstream output echoed back in error messages.
pub const MAX_SNIPPET_LENGTH: usize = 200;

/// Interview operation errors.
///
/// The variants map onto the outcome taxonomy callers see: validation,
/// not-found, conflict, upstream-parse-failure, upstream-unavailable,
/// rate-limited, infrastructure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewError {
    /// Session was not found.
    NotFound(SessionId),
    /// Input was rejected before any external call.
    ValidationFailed { field: String, message: String },
    /// The current question already has an evaluation.
    DuplicateEvaluation { question_id: String },
    /// Operation requires questions but none were generated.
    QuestionsNotGenerated,
    /// Answer submission attempted on a completed session.
    SessionCompleted,
    /// Report requested before the session completed.
    NotCompleted,
    /// Navigation would leave the question range.
    CursorOutOfRange { requested: i64, length: usize },
    /// The reasoning service returned content that is not usable JSON.
    /// Carries a truncated snippet of the raw response for diagnosis.
    UpstreamParseFailure { snippet: String },
    /// The reasoning service could not be reached or timed out.
    UpstreamUnavailable { message: String },
    /// Caller exceeded the submission rate limit.
    RateLimited { retry_after_secs: u32 },
    /// Infrastructure error.
    Infrastructure(String),
}

impl InterviewError {
    pub fn not_found(id: SessionId) -> Self {
        InterviewError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InterviewError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn duplicate_evaluation(question_id: impl Into<String>) -> Self {
        InterviewError::DuplicateEvaluation {
            question_id: question_id.into(),
        }
    }

    /// Builds a parse failure from the raw upstream text, truncating to
    /// [`MAX_SNIPPET_LENGTH`] characters.
    pub fn upstream_parse_failure(raw: &str) -> Self {
        InterviewError::UpstreamParseFailure {
            snippet: truncate_snippet(raw),
        }
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        InterviewError::UpstreamUnavailable {
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        InterviewError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            InterviewError::NotFound(_) => ErrorCode::SessionNotFound,
            InterviewError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            InterviewError::DuplicateEvaluation { .. } => ErrorCode::DuplicateEvaluation,
            InterviewError::QuestionsNotGenerated => ErrorCode::InvalidStateTransition,
            InterviewError::SessionCompleted => ErrorCode::SessionCompleted,
            InterviewError::NotCompleted => ErrorCode::ReportNotReady,
            InterviewError::CursorOutOfRange { .. } => ErrorCode::CursorOutOfRange,
            InterviewError::UpstreamParseFailure { .. } => ErrorCode::UpstreamParseFailure,
            InterviewError::UpstreamUnavailable { .. } => ErrorCode::UpstreamUnavailable,
            InterviewError::RateLimited { .. } => ErrorCode::RateLimited,
            InterviewError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            InterviewError::NotFound(id) => format!("Interview session not found: {}", id),
            InterviewError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            InterviewError::DuplicateEvaluation { question_id } => format!(
                "Question '{}' has already been answered and evaluated",
                question_id
            ),
            InterviewError::QuestionsNotGenerated => {
                "Questions have not been generated for this session".to_string()
            }
            InterviewError::SessionCompleted => {
                "Interview is completed; no further answers are accepted".to_string()
            }
            InterviewError::NotCompleted => {
                "Report is only available once the interview is completed".to_string()
            }
            InterviewError::CursorOutOfRange { requested, length } => format!(
                "Cannot move to question {} of {}",
                requested + 1,
                length
            ),
            InterviewError::UpstreamParseFailure { snippet } => format!(
                "Evaluation service returned invalid JSON: {}",
                snippet
            ),
            InterviewError::UpstreamUnavailable { message } => {
                format!("Evaluation service unavailable: {}", message)
            }
            InterviewError::RateLimited { retry_after_secs } => format!(
                "Too many submissions; retry after {}s",
                retry_after_secs
            ),
            InterviewError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for InterviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for InterviewError {}

impl From<DomainError> for InterviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => InterviewError::Infrastructure(err.to_string()),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => InterviewError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::DuplicateEvaluation => InterviewError::DuplicateEvaluation {
                question_id: err
                    .details
                    .get("question_id")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
            },
            ErrorCode::SessionCompleted => InterviewError::SessionCompleted,
            ErrorCode::ReportNotReady => InterviewError::NotCompleted,
            ErrorCode::CursorOutOfRange => InterviewError::CursorOutOfRange {
                requested: err
                    .details
                    .get("requested")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(-1),
                length: err
                    .details
                    .get("length")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0),
            },
            ErrorCode::InvalidStateTransition => InterviewError::QuestionsNotGenerated,
            _ => InterviewError::Infrastructure(err.to_string()),
        }
    }
}

fn truncate_snippet(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= MAX_SNIPPET_LENGTH {
        return trimmed.to_string();
    }
    trimmed.chars().take(MAX_SNIPPET_LENGTH).collect()
}
