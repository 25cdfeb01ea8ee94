//! Evaluation and answer records.
//!
//! One evaluation exists per answered question. Evaluations are created by
//! the normalizer from model output and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Score, Timestamp};

/// A candidate's submitted answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Id of the question this answers.
    pub question_id: String,
    /// The answer text as submitted.
    pub text: String,
    /// When the answer was submitted.
    pub submitted_at: Timestamp,
}

impl Answer {
    /// Creates an answer submitted now.
    pub fn new(question_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            text: text.into(),
            submitted_at: Timestamp::now(),
        }
    }
}

/// Scored judgment of a single answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Id of the evaluated question.
    pub question_id: String,
    /// Technical depth and correctness.
    pub technical: Score,
    /// Clarity and structure of the answer.
    pub communication: Score,
    /// Approach, decomposition, tradeoff awareness.
    pub problem_solving: Score,
    /// Overall judgment for this answer.
    pub overall: Score,
    /// What the answer did well. Short list, may be empty.
    pub strengths: Vec<String>,
    /// Where the answer fell short. Short list, may be empty.
    pub gaps: Vec<String>,
    /// One suggested follow-up question for a human interviewer.
    pub follow_up: String,
    /// When the evaluation was recorded.
    pub evaluated_at: Timestamp,
}

impl Evaluation {
    /// Mean of the three sub-scores, used when the model omits an overall.
    pub fn derived_overall(technical: Score, communication: Score, problem_solving: Score) -> Score {
        let mean =
            (technical.as_f64() + communication.as_f64() + problem_solving.as_f64()) / 3.0;
        Score::clamped(mean)
    }
}
