//! InterviewStatus enum for tracking the lifecycle of interview sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an interview session.
///
/// Progression is monotonic: `Created -> InProgress -> Completed`.
/// There is no administrative regression path in this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    /// Session exists but no questions have been generated yet.
    #[default]
    Created,
    /// Questions exist; zero or more have been answered.
    InProgress,
    /// The last question's answer was evaluated. Terminal.
    Completed,
}

impl InterviewStatus {
    /// Returns true if answer submissions are accepted in this status.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, InterviewStatus::InProgress)
    }

    /// Returns true if this is the terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InterviewStatus::Completed)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Created -> InProgress
    /// - InProgress -> Completed
    pub fn can_transition_to(&self, target: &InterviewStatus) -> bool {
        use InterviewStatus::*;
        matches!(
            (self, target),
            (Created, InProgress) | (InProgress, Completed)
        )
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InterviewStatus::Created => "created",
            InterviewStatus::InProgress => "in_progress",
            InterviewStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}
