//! Interview lifecycle handlers.
//!
//! One handler per operation. Each request is handled statelessly: the
//! handler re-reads current state from the store, applies a pure
//! transformation, and writes the result back. Correctness therefore
//! reduces to the store's read-modify-write primitive plus idempotency
//! checks re-derived from persisted state.

mod create_session;
mod generate_questions;
mod generate_report;
mod get_session;
mod list_sessions;
mod log_event;
mod navigate;
mod prompts;
mod submit_answer;

pub use create_session::{
    CreateInterviewCommand, CreateInterviewHandler, DEFAULT_QUESTION_COUNT,
};
pub use generate_questions::{
    GenerateQuestionsCommand, GenerateQuestionsHandler, GenerateQuestionsResult,
};
pub use generate_report::{GenerateReportCommand, GenerateReportHandler, GenerateReportResult};
pub use get_session::{GetInterviewHandler, GetInterviewQuery, GetReportHandler, GetReportQuery};
pub use list_sessions::{InterviewFilter, ListInterviewsHandler};
pub use log_event::{
    LogIntegrityEventCommand, LogIntegrityEventHandler, LogIntegrityEventResult,
};
pub use navigate::{NavigateCommand, NavigateHandler, NavigateResult};
pub use prompts::{build_evaluation_prompt, build_question_prompt, build_report_prompt};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};

use std::time::Duration;

/// Per-purpose deadlines for reasoning-service calls.
///
/// Report synthesis processes a full transcript and tolerates a longer
/// deadline than the per-answer evaluation path.
#[derive(Debug, Clone, Copy)]
pub struct ReasoningBudgets {
    pub question_timeout: Duration,
    pub evaluation_timeout: Duration,
    pub report_timeout: Duration,
}

impl Default for ReasoningBudgets {
    fn default() -> Self {
        Self {
            question_timeout: Duration::from_secs(30),
            evaluation_timeout: Duration::from_secs(20),
            report_timeout: Duration::from_secs(60),
        }
    }
}
