//! Running score summary.
//!
//! Derived state: recomputed from the full evaluation list on every
//! mutation, never persisted or mutated independently. The list is bounded
//! by the question count, so an O(n) fold on each call is the right trade.

use serde::{Deserialize, Serialize};

use super::evaluation::Evaluation;

/// Aggregate of all evaluations recorded so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoreSummary {
    /// Number of evaluated questions.
    pub count_evaluated: u32,
    /// Per-dimension averages, rounded to one decimal.
    pub avg_technical: f64,
    pub avg_communication: f64,
    pub avg_problem_solving: f64,
    pub avg_overall: f64,
}

impl ScoreSummary {
    /// Folds an evaluation list into a summary.
    ///
    /// Empty input yields the all-zero summary.
    pub fn from_evaluations(evaluations: &[Evaluation]) -> Self {
        if evaluations.is_empty() {
            return Self::default();
        }

        let n = evaluations.len() as f64;
        let mut technical = 0.0;
        let mut communication = 0.0;
        let mut problem_solving = 0.0;
        let mut overall = 0.0;

        for eval in evaluations {
            technical += eval.technical.as_f64();
            communication += eval.communication.as_f64();
            problem_solving += eval.problem_solving.as_f64();
            overall += eval.overall.as_f64();
        }

        Self {
            count_evaluated: evaluations.len() as u32,
            avg_technical: round_one_decimal(technical / n),
            avg_communication: round_one_decimal(communication / n),
            avg_problem_solving: round_one_decimal(problem_solving / n),
            avg_overall: round_one_decimal(overall / n),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Score, Timestamp};
    use proptest::prelude::*;

    fn eval(technical: u8, communication: u8, problem_solving: u8, overall: u8) -> Evaluation {
        Evaluation {
            question_id: "q1".to_string(),
            technical: Score::try_new(technical).unwrap(),
            communication: Score::try_new(communication).unwrap(),
            problem_solving: Score::try_new(problem_solving).unwrap(),
            overall: Score::try_new(overall).unwrap(),
            strengths: vec![],
            gaps: vec![],
            follow_up: "Tell me more.".to_string(),
            evaluated_at: Timestamp::now(),
        }
    }

    #[test]
    fn empty_input_yields_zero_summary() {
        let summary = ScoreSummary::from_evaluations(&[]);
        assert_eq!(summary.count_evaluated, 0);
        assert_eq!(summary.avg_overall, 0.0);
        assert_eq!(summary.avg_technical, 0.0);
    }

    #[test]
    fn averages_are_rounded_to_one_decimal() {
        // technical: (7 + 8) / 2 = 7.5; overall: (6 + 7) / 2 = 6.5
        let evals = vec![eval(7, 5, 4, 6), eval(8, 6, 5, 7)];
        let summary = ScoreSummary::from_evaluations(&evals);
        assert_eq!(summary.count_evaluated, 2);
        assert_eq!(summary.avg_technical, 7.5);
        assert_eq!(summary.avg_overall, 6.5);
    }

    #[test]
    fn one_third_rounds_correctly() {
        // (6 + 6 + 7) / 3 = 6.333... -> 6.3
        let evals = vec![eval(6, 6, 6, 6), eval(6, 6, 6, 6), eval(7, 7, 7, 7)];
        let summary = ScoreSummary::from_evaluations(&evals);
        assert_eq!(summary.avg_overall, 6.3);
    }

    #[test]
    fn spec_scenario_three_answers() {
        // overall scores {6, 8, 10} -> avg 8.0
        let evals = vec![eval(6, 6, 6, 6), eval(8, 8, 8, 8), eval(10, 10, 10, 10)];
        let summary = ScoreSummary::from_evaluations(&evals);
        assert_eq!(summary.count_evaluated, 3);
        assert_eq!(summary.avg_overall, 8.0);
    }

    proptest! {
        #[test]
        fn count_always_matches_input_length(scores in prop::collection::vec(0u8..=10, 0..25)) {
            let evals: Vec<Evaluation> =
                scores.iter().map(|&s| eval(s, s, s, s)).collect();
            let summary = ScoreSummary::from_evaluations(&evals);
            prop_assert_eq!(summary.count_evaluated as usize, evals.len());
        }

        #[test]
        fn averages_stay_in_score_range(scores in prop::collection::vec(0u8..=10, 1..25)) {
            let evals: Vec<Evaluation> =
                scores.iter().map(|&s| eval(s, s, s, s)).collect();
            let summary = ScoreSummary::from_evaluations(&evals);
            prop_assert!(summary.avg_overall >= 0.0 && summary.avg_overall <= 10.0);
            prop_assert!(summary.avg_technical >= 0.0 && summary.avg_technical <= 10.0);
        }

        #[test]
        fn recomputation_is_deterministic(scores in prop::collection::vec(0u8..=10, 0..25)) {
            let evals: Vec<Evaluation> =
                scores.iter().map(|&s| eval(s, s, s, s)).collect();
            let first = ScoreSummary::from_evaluations(&evals);
            let second = ScoreSummary::from_evaluations(&evals);
            prop_assert_eq!(first, second);
        }
    }
}
