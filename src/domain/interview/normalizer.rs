//! Evaluation normalizer.
//!
//! Turns raw (possibly malformed) reasoning-service output into bounded,
//! schema-valid question sets, evaluations, and reports. Parsing is a
//! two-stage strategy returning a tagged outcome; once parsed, numeric
//! fields are round-then-clamped, list fields are filtered, truncated,
//! capped, and padded to their declared bounds, and enum-like fields are
//! validated against fixed allow-sets. An unparsable response is surfaced
//! to the caller, never silently coerced into a fabricated record.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::domain::foundation::{DomainError, Score, Timestamp};

use super::evaluation::Evaluation;
use super::question::{Difficulty, Question, QuestionCategory};
use super::report::{
    EvidenceItem, EvidenceKind, IntegritySummary, Recommendation, Report, MAX_EVIDENCE, MAX_GAPS,
    MAX_NEXT_ROUND_FOCUS, MAX_STRENGTHS, MIN_GAPS, MIN_NEXT_ROUND_FOCUS, MIN_STRENGTHS,
};
use super::session::MAX_QUESTION_COUNT;
use super::summary::ScoreSummary;

/// Maximum characters kept per list item.
pub const MAX_ITEM_LENGTH: usize = 240;

/// Maximum characters kept for the executive summary.
pub const MAX_SUMMARY_LENGTH: usize = 2_000;

/// Maximum strength/gap entries kept on a single evaluation.
pub const MAX_EVALUATION_NOTES: usize = 5;

/// Characters of raw text preserved in a parse-failure snippet.
const SNIPPET_LENGTH: usize = 200;

/// Gap statements at or below this length are candidates for the
/// generic-filler filter.
const FILLER_LENGTH_THRESHOLD: usize = 80;

static VAGUE_PHRASES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "needs more depth",
        "could improve",
        "needs improvement",
        "lacks detail",
        "could be better",
        "room for improvement",
        "more practice needed",
        "should study more",
    ]
});

static TECH_KEYWORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "rust", "python", "java", "typescript", "javascript", "go", "sql", "nosql", "postgres",
        "redis", "kafka", "kubernetes", "docker", "aws", "gcp", "azure", "react", "graphql",
        "grpc", "http", "rest", "api", "database", "index", "cache", "caching", "concurrency",
        "threading", "async", "testing", "tdd", "ci", "git", "linux", "networking", "tcp",
        "security", "oauth", "encryption", "microservice", "distributed", "algorithm",
        "data structure", "complexity", "profiling", "observability", "metrics",
    ]
});

/// Tagged result of the two-stage parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Usable JSON was recovered.
    Parsed(Value),
    /// Neither stage produced JSON; carries a truncated raw snippet.
    ParseFailed { snippet: String },
}

impl ParseOutcome {
    /// Returns the parsed value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            ParseOutcome::Parsed(value) => Some(value),
            ParseOutcome::ParseFailed { .. } => None,
        }
    }
}

/// Two-stage parse of raw model output.
///
/// Stage one is a strict JSON parse of the trimmed text. Stage two
/// extracts the substring between the first `{` and the last `}` and
/// retries, which recovers objects wrapped in prose or markdown fences.
pub fn parse_model_json(raw: &str) -> ParseOutcome {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return ParseOutcome::Parsed(value);
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return ParseOutcome::Parsed(value);
            }
        }
    }

    ParseOutcome::ParseFailed {
        snippet: trimmed.chars().take(SNIPPET_LENGTH).collect(),
    }
}

/// Normalizes a parsed question-set response.
///
/// Accepts either `{"questions": [...]}` or a bare array. Entries without
/// usable text are dropped; missing ids get the deterministic `q{n}`
/// fallback; missing category/difficulty get defaults. The set is capped
/// at `target_count` (and the global maximum).
///
/// # Errors
///
/// - `ValidationFailed` if no usable question survives
pub fn normalize_questions(
    value: &Value,
    target_count: usize,
) -> Result<Vec<Question>, DomainError> {
    let entries = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => value
            .get("questions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    };

    let cap = target_count.min(MAX_QUESTION_COUNT);
    let mut questions = Vec::new();

    for entry in entries {
        if questions.len() == cap {
            break;
        }
        let text = entry
            .get("text")
            .or_else(|| entry.get("question"))
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if text.is_empty() {
            continue;
        }

        let position = questions.len() + 1;
        let id = entry
            .get("id")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Question::fallback_id(position));

        let category = entry
            .get("category")
            .and_then(Value::as_str)
            .map(QuestionCategory::parse_lenient)
            .unwrap_or_default();
        let difficulty = entry
            .get("difficulty")
            .and_then(Value::as_str)
            .map(Difficulty::parse_lenient)
            .unwrap_or_default();

        questions.push(Question {
            id,
            text: truncate(text, MAX_SUMMARY_LENGTH),
            category,
            difficulty,
        });
    }

    if questions.is_empty() {
        return Err(DomainError::validation(
            "questions",
            "Response contained no usable questions",
        ));
    }

    Ok(questions)
}

/// Normalizes a parsed per-answer evaluation.
///
/// Never fails: missing or out-of-range fields degrade to bounded
/// defaults. Scores are round-then-clamped to 0-10; an absent overall is
/// derived as the mean of the three sub-scores.
pub fn normalize_evaluation(value: &Value, question_id: &str) -> Evaluation {
    let technical = score_field(value, &["technical"]);
    let communication = score_field(value, &["communication"]);
    let problem_solving = score_field(value, &["problem_solving", "problemSolving"]);

    let overall = match number_field(value, &["overall"]) {
        Some(raw) => Score::clamped(raw),
        None => Evaluation::derived_overall(technical, communication, problem_solving),
    };

    let strengths = bounded_list(value, "strengths", MAX_EVALUATION_NOTES);
    let gaps = bounded_list(value, "gaps", MAX_EVALUATION_NOTES);

    let follow_up = value
        .get("follow_up")
        .or_else(|| value.get("followUp"))
        .or_else(|| value.get("follow_up_question"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| truncate(s, MAX_ITEM_LENGTH))
        .unwrap_or_else(|| "Ask the candidate to walk through a concrete example.".to_string());

    Evaluation {
        question_id: question_id.to_string(),
        technical,
        communication,
        problem_solving,
        overall,
        strengths,
        gaps,
        follow_up,
        evaluated_at: Timestamp::now(),
    }
}

/// Normalizes a parsed report response against its calibration context.
///
/// Never fails: every field degrades to a bounded default. The confidence
/// ceiling is applied after clamping, and the integrity block is attached
/// only when the session recorded signals.
pub fn normalize_report(
    value: &Value,
    summary: &ScoreSummary,
    integrity: Option<IntegritySummary>,
) -> Report {
    let recommendation = value
        .get("recommendation")
        .and_then(Value::as_str)
        .map(Recommendation::parse_lenient)
        .unwrap_or_default();

    let raw_confidence = number_field(value, &["confidence"]).unwrap_or(50.0);
    let clamped = raw_confidence.round().clamp(0.0, 100.0) as u8;
    let confidence = clamped.min(confidence_ceiling(summary.count_evaluated, summary.avg_overall));

    let executive_summary = value
        .get("executive_summary")
        .or_else(|| value.get("summary"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| truncate(s, MAX_SUMMARY_LENGTH))
        .unwrap_or_else(|| {
            format!(
                "Candidate averaged {:.1}/10 overall across {} evaluated answers.",
                summary.avg_overall, summary.count_evaluated
            )
        });

    let mut strengths = bounded_list(value, "strengths", MAX_STRENGTHS);
    pad_to_minimum(&mut strengths, MIN_STRENGTHS, &strength_fallbacks(summary));

    let mut gaps = bounded_list(value, "gaps", MAX_GAPS);
    gaps.retain(|gap| !is_generic_filler(gap));
    pad_to_minimum(&mut gaps, MIN_GAPS, &gap_fallbacks(summary));

    let evidence = evidence_list(value);

    let mut next_round_focus = bounded_list(value, "next_round_focus", MAX_NEXT_ROUND_FOCUS);
    pad_to_minimum(
        &mut next_round_focus,
        MIN_NEXT_ROUND_FOCUS,
        &[format!(
            "Probe the weakest dimension from this round (overall average {:.1}/10).",
            summary.avg_overall
        )],
    );

    Report {
        recommendation,
        confidence,
        executive_summary,
        strengths,
        gaps,
        evidence,
        next_round_focus,
        integrity: integrity.filter(|block| !block.is_empty()),
        generated_at: Timestamp::now(),
    }
}

/// Deliberate confidence ceiling, applied regardless of the raw value.
///
/// A report must not claim high certainty from a short or weak interview:
/// fewer than 3 evaluated answers cap confidence at 70, fewer than 6 at
/// 85, and 95 otherwise; a low average overall caps it further.
pub fn confidence_ceiling(count_evaluated: u32, avg_overall: f64) -> u8 {
    let volume_cap: u8 = if count_evaluated < 3 {
        70
    } else if count_evaluated < 6 {
        85
    } else {
        95
    };
    let score_cap: u8 = if avg_overall < 4.0 {
        60
    } else if avg_overall < 6.0 {
        80
    } else {
        100
    };
    volume_cap.min(score_cap)
}

/// Returns true for short, vague gap statements with no concrete
/// technology anchor.
pub fn is_generic_filler(gap: &str) -> bool {
    let lower = gap.trim().to_lowercase();
    if lower.chars().count() > FILLER_LENGTH_THRESHOLD {
        return false;
    }
    for phrase in VAGUE_PHRASES.iter() {
        if lower.starts_with(phrase) {
            let rest = &lower[phrase.len()..];
            return !TECH_KEYWORDS.iter().any(|kw| rest.contains(kw));
        }
    }
    false
}

// ─────────────────────────────────────────────────────────────────────────────
// Field extraction helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Reads the first present numeric field among `names`.
fn number_field(value: &Value, names: &[&str]) -> Option<f64> {
    names
        .iter()
        .find_map(|name| value.get(name).and_then(numeric))
}

fn score_field(value: &Value, names: &[&str]) -> Score {
    number_field(value, names)
        .map(Score::clamped)
        .unwrap_or_default()
}

/// Accepts JSON numbers and numeric strings; models emit both.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Filters a string array field to non-empty entries, truncates each item,
/// and caps the count.
fn bounded_list(value: &Value, field: &str, max: usize) -> Vec<String> {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| truncate(s, MAX_ITEM_LENGTH))
                .take(max)
                .collect()
        })
        .unwrap_or_default()
}

fn evidence_list(value: &Value) -> Vec<EvidenceItem> {
    value
        .get("evidence")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let note = item
                        .get("note")
                        .or_else(|| item.get("text"))
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|s| !s.is_empty())?;
                    let kind = item
                        .get("kind")
                        .or_else(|| item.get("type"))
                        .and_then(Value::as_str)
                        .map(EvidenceKind::parse_lenient)
                        .unwrap_or_default();
                    Some(EvidenceItem {
                        kind,
                        note: truncate(note, MAX_ITEM_LENGTH),
                    })
                })
                .take(MAX_EVIDENCE)
                .collect()
        })
        .unwrap_or_default()
}

/// Appends deterministic fallback entries until `minimum` is met.
fn pad_to_minimum(list: &mut Vec<String>, minimum: usize, fallbacks: &[String]) {
    let mut next = 0;
    while list.len() < minimum && next < fallbacks.len() {
        list.push(fallbacks[next].clone());
        next += 1;
    }
}

fn strength_fallbacks(summary: &ScoreSummary) -> Vec<String> {
    vec![
        format!(
            "Averaged {:.1}/10 on technical depth across {} evaluated answers.",
            summary.avg_technical, summary.count_evaluated
        ),
        format!(
            "Averaged {:.1}/10 on communication across the interview.",
            summary.avg_communication
        ),
        format!(
            "Averaged {:.1}/10 on problem solving across the interview.",
            summary.avg_problem_solving
        ),
        format!(
            "Overall average score is {:.1}/10.",
            summary.avg_overall
        ),
    ]
}

fn gap_fallbacks(summary: &ScoreSummary) -> Vec<String> {
    vec![
        format!(
            "Technical depth averaged {:.1}/10; verify against the role bar in a follow-up round.",
            summary.avg_technical
        ),
        format!(
            "Communication averaged {:.1}/10; assess written communication separately.",
            summary.avg_communication
        ),
        format!(
            "Problem solving averaged {:.1}/10 on a sample of {} answers.",
            summary.avg_problem_solving, summary.count_evaluated
        ),
        "Evidence volume is limited; treat single-answer observations as provisional.".to_string(),
    ]
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn summary(count: u32, avg: f64) -> ScoreSummary {
        ScoreSummary {
            count_evaluated: count,
            avg_technical: avg,
            avg_communication: avg,
            avg_problem_solving: avg,
            avg_overall: avg,
        }
    }

    // Parsing tests

    #[test]
    fn strict_parse_accepts_clean_json() {
        let outcome = parse_model_json(r#"{"overall": 8}"#);
        assert!(matches!(outcome, ParseOutcome::Parsed(_)));
    }

    #[test]
    fn brace_extraction_recovers_wrapped_json() {
        let raw = "Sure! Here is the evaluation:\n```json\n{\"overall\": 8}\n```\nHope this helps.";
        match parse_model_json(raw) {
            ParseOutcome::Parsed(value) => assert_eq!(value["overall"], 8),
            other => panic!("expected parse, got {:?}", other),
        }
    }

    #[test]
    fn hopeless_input_fails_with_snippet() {
        match parse_model_json("I cannot evaluate this answer.") {
            ParseOutcome::ParseFailed { snippet } => {
                assert!(snippet.starts_with("I cannot"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn snippet_is_truncated() {
        let raw = "no json here ".repeat(100);
        match parse_model_json(&raw) {
            ParseOutcome::ParseFailed { snippet } => {
                assert!(snippet.chars().count() <= 200);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    // Question normalization tests

    #[test]
    fn questions_get_fallback_ids_and_defaults() {
        let value = json!({
            "questions": [
                {"text": "What is ownership in Rust?"},
                {"text": "Describe a hard production bug.", "category": "behavioral", "difficulty": "hard"}
            ]
        });
        let questions = normalize_questions(&value, 5).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, "q1");
        assert_eq!(questions[0].category, QuestionCategory::General);
        assert_eq!(questions[0].difficulty, Difficulty::Medium);
        assert_eq!(questions[1].id, "q2");
        assert_eq!(questions[1].category, QuestionCategory::Behavioral);
        assert_eq!(questions[1].difficulty, Difficulty::Hard);
    }

    #[test]
    fn bare_array_is_accepted() {
        let value = json!([{"question": "Why message queues?"}]);
        let questions = normalize_questions(&value, 5).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Why message queues?");
    }

    #[test]
    fn entries_without_text_are_dropped() {
        let value = json!({"questions": [{"id": "q1"}, {"text": "  "}, {"text": "Real one?"}]});
        let questions = normalize_questions(&value, 5).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q1");
    }

    #[test]
    fn over_delivery_is_capped_at_target() {
        let entries: Vec<Value> =
            (0..10).map(|i| json!({"text": format!("Q{}?", i)})).collect();
        let questions = normalize_questions(&Value::Array(entries), 3).unwrap();
        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn zero_usable_questions_is_an_error() {
        let value = json!({"questions": []});
        assert!(normalize_questions(&value, 5).is_err());
        assert!(normalize_questions(&json!("nonsense"), 5).is_err());
    }

    // Evaluation normalization tests

    #[test]
    fn evaluation_clamps_out_of_range_scores() {
        let value = json!({
            "technical": 14, "communication": -2, "problem_solving": 7.6, "overall": 9
        });
        let eval = normalize_evaluation(&value, "q1");
        assert_eq!(eval.technical.value(), 10);
        assert_eq!(eval.communication.value(), 0);
        assert_eq!(eval.problem_solving.value(), 8);
        assert_eq!(eval.overall.value(), 9);
        assert_eq!(eval.question_id, "q1");
    }

    #[test]
    fn evaluation_derives_missing_overall() {
        let value = json!({"technical": 6, "communication": 8, "problem_solving": 7});
        let eval = normalize_evaluation(&value, "q1");
        assert_eq!(eval.overall.value(), 7);
    }

    #[test]
    fn evaluation_accepts_numeric_strings() {
        let value = json!({"technical": "8", "communication": "6", "problem_solving": "7"});
        let eval = normalize_evaluation(&value, "q1");
        assert_eq!(eval.technical.value(), 8);
    }

    #[test]
    fn evaluation_bounds_note_lists() {
        let strengths: Vec<String> = (0..12).map(|i| format!("strength {}", i)).collect();
        let value = json!({"strengths": strengths, "gaps": ["", "  ", "real gap"]});
        let eval = normalize_evaluation(&value, "q1");
        assert_eq!(eval.strengths.len(), MAX_EVALUATION_NOTES);
        assert_eq!(eval.gaps, vec!["real gap".to_string()]);
    }

    #[test]
    fn evaluation_defaults_follow_up() {
        let eval = normalize_evaluation(&json!({}), "q1");
        assert!(!eval.follow_up.is_empty());
    }

    // Report normalization tests

    #[test]
    fn report_confidence_capped_by_volume() {
        let value = json!({"confidence": 99, "recommendation": "hire"});
        let report = normalize_report(&value, &summary(2, 8.0), None);
        assert!(report.confidence <= 70);
    }

    #[test]
    fn report_confidence_capped_by_low_average() {
        let value = json!({"confidence": 99});
        let report = normalize_report(&value, &summary(8, 3.0), None);
        assert!(report.confidence <= 60);
    }

    #[test]
    fn report_confidence_honest_value_survives() {
        let value = json!({"confidence": 65});
        let report = normalize_report(&value, &summary(8, 8.0), None);
        assert_eq!(report.confidence, 65);
    }

    #[test]
    fn report_lists_are_padded_to_minimums() {
        let value = json!({"strengths": ["one"], "gaps": []});
        let report = normalize_report(&value, &summary(4, 7.0), None);
        assert!(report.strengths.len() >= MIN_STRENGTHS);
        assert!(report.strengths.len() <= MAX_STRENGTHS);
        assert!(report.gaps.len() >= MIN_GAPS);
        assert!(report.gaps.len() <= MAX_GAPS);
        assert_eq!(report.strengths[0], "one");
        // Padding is derived from numeric context.
        assert!(report.strengths[1].contains("7.0"));
    }

    #[test]
    fn report_lists_are_capped_at_maximums() {
        let many: Vec<String> = (0..15).map(|i| format!("entry number {}", i)).collect();
        let value = json!({"strengths": many.clone(), "gaps": many, "next_round_focus": (0..9).map(|i| format!("focus {}", i)).collect::<Vec<_>>()});
        let report = normalize_report(&value, &summary(4, 7.0), None);
        assert_eq!(report.strengths.len(), MAX_STRENGTHS);
        assert_eq!(report.gaps.len(), MAX_GAPS);
        assert_eq!(report.next_round_focus.len(), MAX_NEXT_ROUND_FOCUS);
    }

    #[test]
    fn report_unknown_recommendation_collapses_to_borderline() {
        let value = json!({"recommendation": "hire immediately!!"});
        let report = normalize_report(&value, &summary(4, 7.0), None);
        assert_eq!(report.recommendation, Recommendation::Borderline);
    }

    #[test]
    fn report_evidence_is_typed_and_capped() {
        let items: Vec<Value> = (0..9)
            .map(|i| json!({"kind": "score_pattern", "note": format!("evidence {}", i)}))
            .collect();
        let value = json!({"evidence": items});
        let report = normalize_report(&value, &summary(4, 7.0), None);
        assert_eq!(report.evidence.len(), MAX_EVIDENCE);
        assert_eq!(report.evidence[0].kind, EvidenceKind::ScorePattern);
    }

    #[test]
    fn report_attaches_integrity_only_when_nonempty() {
        let block = IntegritySummary {
            tab_switches: 3,
            security_event_count: 4,
            critical_events: vec!["devtools_open".to_string()],
        };
        let report = normalize_report(&json!({}), &summary(4, 7.0), Some(block.clone()));
        assert_eq!(report.integrity, Some(block));

        let empty = IntegritySummary {
            tab_switches: 0,
            security_event_count: 0,
            critical_events: vec![],
        };
        let report = normalize_report(&json!({}), &summary(4, 7.0), Some(empty));
        assert!(report.integrity.is_none());
    }

    // Filler filter tests

    #[test]
    fn vague_gaps_are_dropped() {
        assert!(is_generic_filler("needs more depth"));
        assert!(is_generic_filler("could improve"));
    }

    #[test]
    fn vague_gaps_with_tech_anchor_survive() {
        assert!(!is_generic_filler("needs more depth in SQL indexing"));
        assert!(!is_generic_filler("could improve Kubernetes troubleshooting"));
    }

    #[test]
    fn long_specific_gaps_survive() {
        let gap = "Struggled to reason about consistency guarantees when the discussion \
                   moved from a single node to a replicated setup.";
        assert!(!is_generic_filler(gap));
    }

    #[test]
    fn filler_is_filtered_from_reports() {
        let value = json!({"gaps": ["needs more depth", "weak on Postgres query planning"]});
        let report = normalize_report(&value, &summary(4, 7.0), None);
        assert!(report.gaps.contains(&"weak on Postgres query planning".to_string()));
        assert!(!report.gaps.contains(&"needs more depth".to_string()));
    }

    // Property tests

    proptest! {
        #[test]
        fn confidence_never_exceeds_ceiling(
            raw in 0f64..200.0,
            count in 0u32..10,
            avg in 0f64..10.0,
        ) {
            let value = json!({"confidence": raw});
            let report = normalize_report(&value, &summary(count, avg), None);
            prop_assert!(report.confidence <= confidence_ceiling(count, avg));
            if count < 3 {
                prop_assert!(report.confidence <= 70);
            }
        }

        #[test]
        fn scores_always_land_in_range(raw in -1000f64..1000.0) {
            let value = json!({"technical": raw, "communication": raw, "problem_solving": raw});
            let eval = normalize_evaluation(&value, "q1");
            prop_assert!(eval.technical.value() <= 10);
            prop_assert!(eval.overall.value() <= 10);
        }

        #[test]
        fn report_list_bounds_always_hold(
            n_strengths in 0usize..20,
            n_gaps in 0usize..20,
        ) {
            let strengths: Vec<String> = (0..n_strengths).map(|i| format!("s{}", i)).collect();
            let gaps: Vec<String> = (0..n_gaps).map(|i| format!("g{}", i)).collect();
            let value = json!({"strengths": strengths, "gaps": gaps});
            let report = normalize_report(&value, &summary(4, 7.0), None);
            prop_assert!((MIN_STRENGTHS..=MAX_STRENGTHS).contains(&report.strengths.len()));
            prop_assert!((MIN_GAPS..=MAX_GAPS).contains(&report.gaps.len()));
            prop_assert!(report.evidence.len() <= MAX_EVIDENCE);
        }
    }
}
