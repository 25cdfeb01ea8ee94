//! CreateInterviewHandler - Command handler for session intake.
//!
//! All three intake modes converge here; the mode only decides which
//! intake fields are required.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::interview::{IntakeContext, InterviewError, InterviewMode, InterviewSession};
use crate::ports::SessionStore;

/// Question count used when the caller does not specify one.
pub const DEFAULT_QUESTION_COUNT: usize = 5;

/// Command to create a new interview session.
#[derive(Debug, Clone)]
pub struct CreateInterviewCommand {
    pub mode: InterviewMode,
    pub intake: IntakeContext,
    pub seed_text: String,
    pub target_question_count: Option<usize>,
}

/// Handler for session creation.
pub struct CreateInterviewHandler {
    store: Arc<dyn SessionStore>,
}

impl CreateInterviewHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: CreateInterviewCommand,
    ) -> Result<InterviewSession, InterviewError> {
        let session = InterviewSession::new(
            SessionId::new(),
            cmd.mode,
            cmd.intake,
            cmd.seed_text,
            cmd.target_question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
        )?;

        self.store.create(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            mode = %session.mode(),
            "interview session created"
        );
        Ok(session)
    }
}
