//! Question value object.
//!
//! Questions are immutable once generated. Their ids are short strings
//! scoped to the owning session, not globally unique.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single generated interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Session-scoped id, e.g. `q1`, `q2`.
    pub id: String,
    /// The question text shown to the candidate.
    pub text: String,
    /// Broad category.
    pub category: QuestionCategory,
    /// Intended difficulty.
    pub difficulty: Difficulty,
}

impl Question {
    /// Creates a question with the deterministic fallback id for position `n`
    /// (1-based), used when the model response omits an id.
    pub fn fallback_id(n: usize) -> String {
        format!("q{}", n)
    }
}

/// Broad question category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Technical,
    Behavioral,
    ProblemSolving,
    SystemDesign,
    /// Fallback when the model omits or invents a category.
    #[default]
    General,
}

impl QuestionCategory {
    /// Parses a model-supplied category, collapsing unknowns to the default.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "technical" => QuestionCategory::Technical,
            "behavioral" | "behavioural" => QuestionCategory::Behavioral,
            "problem_solving" | "problem-solving" | "problem solving" => {
                QuestionCategory::ProblemSolving
            }
            "system_design" | "system-design" | "system design" => QuestionCategory::SystemDesign,
            _ => QuestionCategory::General,
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionCategory::Technical => "technical",
            QuestionCategory::Behavioral => "behavioral",
            QuestionCategory::ProblemSolving => "problem_solving",
            QuestionCategory::SystemDesign => "system_design",
            QuestionCategory::General => "general",
        };
        write!(f, "{}", s)
    }
}

/// Intended question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses a model-supplied difficulty, collapsing unknowns to the default.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" | "junior" => Difficulty::Easy,
            "hard" | "senior" | "expert" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_ids_are_one_based() {
        assert_eq!(Question::fallback_id(1), "q1");
        assert_eq!(Question::fallback_id(12), "q12");
    }

    #[test]
    fn category_parses_known_values() {
        assert_eq!(
            QuestionCategory::parse_lenient("Technical"),
            QuestionCategory::Technical
        );
        assert_eq!(
            QuestionCategory::parse_lenient("problem-solving"),
            QuestionCategory::ProblemSolving
        );
        assert_eq!(
            QuestionCategory::parse_lenient("System Design"),
            QuestionCategory::SystemDesign
        );
    }

    #[test]
    fn category_collapses_unknowns_to_general() {
        assert_eq!(
            QuestionCategory::parse_lenient("vibes"),
            QuestionCategory::General
        );
        assert_eq!(QuestionCategory::parse_lenient(""), QuestionCategory::General);
    }

    #[test]
    fn difficulty_collapses_unknowns_to_medium() {
        assert_eq!(Difficulty::parse_lenient("EASY"), Difficulty::Easy);
        assert_eq!(Difficulty::parse_lenient("senior"), Difficulty::Hard);
        assert_eq!(Difficulty::parse_lenient("???"), Difficulty::Medium);
    }

    #[test]
    fn category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&QuestionCategory::ProblemSolving).unwrap(),
            "\"problem_solving\""
        );
    }
}
