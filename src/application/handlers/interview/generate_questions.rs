//! GenerateQuestionsHandler - the `created -> in_progress` transition.
//!
//! Idempotent: a session that already has questions returns the existing
//! set without touching the reasoning service, which absorbs duplicate
//! "start" calls from client retries and double-clicks. A failed upstream
//! call or unusable response leaves the session in `created` for a later
//! retry.

use std::sync::Arc;

use crate::domain::interview::normalizer::{normalize_questions, parse_model_json, ParseOutcome};
use crate::domain::interview::{InterviewError, InterviewSession};
use crate::ports::{ReasoningPurpose, ReasoningRequest, ReasoningService, SessionStore};

use super::prompts::{build_question_prompt, QUESTION_SYSTEM_PROMPT};
use super::ReasoningBudgets;
use crate::domain::foundation::SessionId;

/// Command to generate the question set for a session.
#[derive(Debug, Clone)]
pub struct GenerateQuestionsCommand {
    pub session_id: SessionId,
}

/// Result of question generation.
#[derive(Debug, Clone)]
pub struct GenerateQuestionsResult {
    pub session: InterviewSession,
    /// False on the idempotent path (questions already existed).
    pub upstream_called: bool,
}

/// Handler for question generation.
pub struct GenerateQuestionsHandler {
    store: Arc<dyn SessionStore>,
    reasoning: Arc<dyn ReasoningService>,
    budgets: ReasoningBudgets,
}

impl GenerateQuestionsHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        reasoning: Arc<dyn ReasoningService>,
        budgets: ReasoningBudgets,
    ) -> Self {
        Self {
            store,
            reasoning,
            budgets,
        }
    }

    #[tracing::instrument(skip(self), fields(session_id = %cmd.session_id))]
    pub async fn handle(
        &self,
        cmd: GenerateQuestionsCommand,
    ) -> Result<GenerateQuestionsResult, InterviewError> {
        let session = self
            .store
            .get(&cmd.session_id)
            .await?
            .ok_or(InterviewError::NotFound(cmd.session_id))?;

        // Idempotency is derived from persisted state, not client flags.
        if !session.questions().is_empty() {
            tracing::debug!("questions already generated; returning existing set");
            return Ok(GenerateQuestionsResult {
                session,
                upstream_called: false,
            });
        }

        let request = ReasoningRequest::new(
            build_question_prompt(&session),
            ReasoningPurpose::QuestionGeneration,
        )
        .with_system(QUESTION_SYSTEM_PROMPT)
        .with_timeout(self.budgets.question_timeout);

        let raw = self.reasoning.complete(request).await?;

        let value = match parse_model_json(&raw) {
            ParseOutcome::Parsed(value) => value,
            ParseOutcome::ParseFailed { .. } => {
                tracing::warn!("question generation returned unparsable content");
                return Err(InterviewError::upstream_parse_failure(&raw));
            }
        };

        let questions = normalize_questions(&value, session.target_question_count())
            .map_err(|_| InterviewError::upstream_parse_failure(&raw))?;

        let updated = self
            .store
            .update(
                &cmd.session_id,
                Box::new(move |mut s| {
                    // A racing call may have won; keep its set unchanged.
                    if !s.questions().is_empty() {
                        return Ok(s);
                    }
                    s.attach_questions(questions)?;
                    Ok(s)
                }),
            )
            .await?
            .ok_or(InterviewError::NotFound(cmd.session_id))?;

        tracing::info!(
            question_count = updated.questions().len(),
            "question set generated"
        );
        Ok(GenerateQuestionsResult {
            session: updated,
            upstream_called: true,
        })
    }
}
