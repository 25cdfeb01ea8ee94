//! HTTP DTOs for interview endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::interview::{
    Difficulty, Evaluation, EvidenceKind, IntegritySummary, InterviewMode, InterviewSession,
    NavigationDirection, Question, QuestionCategory, Recommendation, Report, ScoreSummary,
};
use crate::domain::foundation::InterviewStatus;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new interview session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInterviewRequest {
    pub mode: InterviewMode,
    pub seed_text: String,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub question_count: Option<usize>,
}

/// Request to submit the answer to the current question.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

/// Request to move the cursor.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigateRequest {
    pub direction: NavigationDirection,
}

/// Request to log one integrity event.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEventRequest {
    pub event: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Query parameters for listing sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct ListInterviewsQuery {
    #[serde(default)]
    pub mode: Option<InterviewMode>,
    #[serde(default)]
    pub template_id: Option<String>,
    /// Comma-separated session ids.
    #[serde(default)]
    pub ids: Option<String>,
}

/// Query parameter for share-token report access.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportAccessQuery {
    #[serde(default)]
    pub token: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: String,
    pub text: String,
    pub category: QuestionCategory,
    pub difficulty: Difficulty,
}

impl From<&Question> for QuestionResponse {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            text: question.text.clone(),
            category: question.category,
            difficulty: question.difficulty,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummaryResponse {
    pub count_evaluated: u32,
    pub avg_technical: f64,
    pub avg_communication: f64,
    pub avg_problem_solving: f64,
    pub avg_overall: f64,
}

impl From<&ScoreSummary> for ScoreSummaryResponse {
    fn from(summary: &ScoreSummary) -> Self {
        Self {
            count_evaluated: summary.count_evaluated,
            avg_technical: summary.avg_technical,
            avg_communication: summary.avg_communication,
            avg_problem_solving: summary.avg_problem_solving,
            avg_overall: summary.avg_overall,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub question_id: String,
    pub technical: u8,
    pub communication: u8,
    pub problem_solving: u8,
    pub overall: u8,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub follow_up: String,
}

impl From<&Evaluation> for EvaluationResponse {
    fn from(evaluation: &Evaluation) -> Self {
        Self {
            question_id: evaluation.question_id.clone(),
            technical: evaluation.technical.value(),
            communication: evaluation.communication.value(),
            problem_solving: evaluation.problem_solving.value(),
            overall: evaluation.overall.value(),
            strengths: evaluation.strengths.clone(),
            gaps: evaluation.gaps.clone(),
            follow_up: evaluation.follow_up.clone(),
        }
    }
}

/// Detailed session view.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewResponse {
    pub id: String,
    pub mode: InterviewMode,
    pub status: InterviewStatus,
    pub questions: Vec<QuestionResponse>,
    pub current_question_index: usize,
    pub summary: ScoreSummaryResponse,
    pub evaluations: Vec<EvaluationResponse>,
    pub has_report: bool,
    pub tab_switches: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&InterviewSession> for InterviewResponse {
    fn from(session: &InterviewSession) -> Self {
        Self {
            id: session.id().to_string(),
            mode: session.mode(),
            status: session.status(),
            questions: session.questions().iter().map(Into::into).collect(),
            current_question_index: session.current_question_index(),
            summary: session.summary().into(),
            evaluations: session.evaluations().iter().map(Into::into).collect(),
            has_report: session.report().is_some(),
            tab_switches: session.integrity().tab_switch_count(),
            created_at: session.created_at().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Response for answer submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerResponse {
    pub evaluation: EvaluationResponse,
    pub completed: bool,
    pub current_question_index: usize,
    pub summary: ScoreSummaryResponse,
}

/// Response for navigation.
#[derive(Debug, Clone, Serialize)]
pub struct NavigateResponse {
    pub current_question_index: usize,
    pub question: Option<QuestionResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvidenceResponse {
    pub kind: EvidenceKind,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegritySummaryResponse {
    pub tab_switches: u32,
    pub security_event_count: u32,
    pub critical_events: Vec<String>,
}

impl From<&IntegritySummary> for IntegritySummaryResponse {
    fn from(summary: &IntegritySummary) -> Self {
        Self {
            tab_switches: summary.tab_switches,
            security_event_count: summary.security_event_count,
            critical_events: summary.critical_events.clone(),
        }
    }
}

/// Report view, with the share token attached on the generation path.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub recommendation: Recommendation,
    pub confidence: u8,
    pub executive_summary: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub evidence: Vec<EvidenceResponse>,
    pub next_round_focus: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<IntegritySummaryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
    pub generated_at: String,
}

impl ReportResponse {
    /// Builds a response from a report, optionally attaching the token.
    pub fn from_report(report: &Report, share_token: Option<String>) -> Self {
        Self {
            recommendation: report.recommendation,
            confidence: report.confidence,
            executive_summary: report.executive_summary.clone(),
            strengths: report.strengths.clone(),
            gaps: report.gaps.clone(),
            evidence: report
                .evidence
                .iter()
                .map(|item| EvidenceResponse {
                    kind: item.kind,
                    note: item.note.clone(),
                })
                .collect(),
            next_round_focus: report.next_round_focus.clone(),
            integrity: report.integrity.as_ref().map(Into::into),
            share_token,
            generated_at: report.generated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for integrity event ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct LogEventResponse {
    pub recorded: bool,
    pub audited: bool,
    pub tab_switches: u32,
}

/// List of session summaries.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewListResponse {
    pub items: Vec<InterviewSummaryResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewSummaryResponse {
    pub id: String,
    pub mode: InterviewMode,
    pub status: InterviewStatus,
    pub question_count: usize,
    pub count_evaluated: u32,
    pub avg_overall: f64,
    pub updated_at: String,
}

impl From<&InterviewSession> for InterviewSummaryResponse {
    fn from(session: &InterviewSession) -> Self {
        Self {
            id: session.id().to_string(),
            mode: session.mode(),
            status: session.status(),
            question_count: session.questions().len(),
            count_evaluated: session.summary().count_evaluated,
            avg_overall: session.summary().avg_overall,
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }
}
