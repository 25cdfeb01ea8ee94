//! Final report types.
//!
//! A report is synthesized once per session after completion and cached on
//! the aggregate. Regeneration is an explicit, separate action.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Bounds for normalized report list fields.
pub const MIN_STRENGTHS: usize = 4;
pub const MAX_STRENGTHS: usize = 7;
pub const MIN_GAPS: usize = 4;
pub const MAX_GAPS: usize = 7;
pub const MAX_EVIDENCE: usize = 6;
pub const MIN_NEXT_ROUND_FOCUS: usize = 1;
pub const MAX_NEXT_ROUND_FOCUS: usize = 6;

/// Hiring recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongHire,
    Hire,
    /// Safe default when the model returns something outside the allow-set.
    #[default]
    Borderline,
    NoHire,
}

impl Recommendation {
    /// Parses a model-supplied recommendation, collapsing unknowns to
    /// `Borderline`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strong_hire" | "strong hire" => Recommendation::StrongHire,
            "hire" => Recommendation::Hire,
            "borderline" => Recommendation::Borderline,
            "no_hire" | "no hire" | "reject" => Recommendation::NoHire,
            _ => Recommendation::Borderline,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Recommendation::StrongHire => "strong_hire",
            Recommendation::Hire => "hire",
            Recommendation::Borderline => "borderline",
            Recommendation::NoHire => "no_hire",
        };
        write!(f, "{}", s)
    }
}

/// What kind of observation an evidence item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// Quoted or paraphrased from a specific answer.
    #[default]
    AnswerExcerpt,
    /// Pattern across the per-question scores.
    ScorePattern,
    /// Observation about how the candidate communicated.
    CommunicationStyle,
    /// Drawn from the session's integrity signals.
    IntegritySignal,
}

impl EvidenceKind {
    /// Parses a model-supplied evidence kind, collapsing unknowns to the
    /// default category.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "answer_excerpt" | "answer" | "quote" => EvidenceKind::AnswerExcerpt,
            "score_pattern" | "scores" => EvidenceKind::ScorePattern,
            "communication_style" | "communication" => EvidenceKind::CommunicationStyle,
            "integrity_signal" | "integrity" => EvidenceKind::IntegritySignal,
            _ => EvidenceKind::AnswerExcerpt,
        }
    }
}

/// One concrete, typed observation backing the recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub kind: EvidenceKind,
    pub note: String,
}

/// Integrity block included in the report when any signal was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegritySummary {
    /// Derived blur count from the retained event window.
    pub tab_switches: u32,
    /// Total security events in the retained window.
    pub security_event_count: u32,
    /// Critical event names observed, deduplicated, in first-seen order.
    pub critical_events: Vec<String>,
}

impl IntegritySummary {
    /// Returns true if there is nothing to report.
    pub fn is_empty(&self) -> bool {
        self.tab_switches == 0 && self.security_event_count == 0
    }
}

/// Final narrative report for a completed interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub recommendation: Recommendation,
    /// 0-100, capped by evaluation volume and average score.
    pub confidence: u8,
    pub executive_summary: String,
    /// Always between [`MIN_STRENGTHS`] and [`MAX_STRENGTHS`] entries.
    pub strengths: Vec<String>,
    /// Always between [`MIN_GAPS`] and [`MAX_GAPS`] entries.
    pub gaps: Vec<String>,
    /// At most [`MAX_EVIDENCE`] entries.
    pub evidence: Vec<EvidenceItem>,
    /// Between [`MIN_NEXT_ROUND_FOCUS`] and [`MAX_NEXT_ROUND_FOCUS`] entries.
    pub next_round_focus: Vec<String>,
    /// Present only when the session recorded at least one signal.
    pub integrity: Option<IntegritySummary>,
    pub generated_at: Timestamp,
}
