//! SubmitAnswerHandler - per-answer evaluation and progress.
//!
//! Validation happens before the reasoning-service round trip so invalid
//! or duplicate submissions never cost an upstream call, and the same
//! guards are re-derived inside the store's read-modify-write mutation
//! because the state may have moved in between.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::interview::normalizer::{normalize_evaluation, parse_model_json, ParseOutcome};
use crate::domain::interview::{Answer, Evaluation, InterviewError, InterviewSession};
use crate::ports::{
    RateLimitKey, RateLimitResult, RateLimiter, ReasoningPurpose, ReasoningRequest,
    ReasoningService, SessionStore,
};

use super::prompts::{build_evaluation_prompt, EVALUATION_SYSTEM_PROMPT};
use super::ReasoningBudgets;

/// Rate-limited resource name for the submission path.
const ANSWERS_RESOURCE: &str = "answers";

/// Command to submit the answer to the current question.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub answer_text: String,
    /// Best-effort caller identity (network origin) for rate limiting.
    pub origin: Option<String>,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub session: InterviewSession,
    pub evaluation: Evaluation,
    /// True when this submission answered the last question.
    pub completed: bool,
}

/// Handler for answer submission.
pub struct SubmitAnswerHandler {
    store: Arc<dyn SessionStore>,
    reasoning: Arc<dyn ReasoningService>,
    rate_limiter: Arc<dyn RateLimiter>,
    budgets: ReasoningBudgets,
}

impl SubmitAnswerHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        reasoning: Arc<dyn ReasoningService>,
        rate_limiter: Arc<dyn RateLimiter>,
        budgets: ReasoningBudgets,
    ) -> Self {
        Self {
            store,
            reasoning,
            rate_limiter,
            budgets,
        }
    }

    #[tracing::instrument(skip(self, cmd), fields(session_id = %cmd.session_id))]
    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
    ) -> Result<SubmitAnswerResult, InterviewError> {
        self.check_rate_limit(cmd.origin.as_deref()).await?;

        let session = self
            .store
            .get(&cmd.session_id)
            .await?
            .ok_or(InterviewError::NotFound(cmd.session_id))?;

        // Rejects short answers, wrong status, and duplicates before any
        // upstream call is made.
        let question = session.ensure_answer_acceptable(&cmd.answer_text)?.clone();

        let request = ReasoningRequest::new(
            build_evaluation_prompt(&session, &question, &cmd.answer_text),
            ReasoningPurpose::AnswerEvaluation,
        )
        .with_system(EVALUATION_SYSTEM_PROMPT)
        .with_timeout(self.budgets.evaluation_timeout);

        let raw = self.reasoning.complete(request).await?;

        let value = match parse_model_json(&raw) {
            ParseOutcome::Parsed(value) => value,
            ParseOutcome::ParseFailed { .. } => {
                tracing::warn!(question_id = %question.id, "evaluation returned unparsable content");
                return Err(InterviewError::upstream_parse_failure(&raw));
            }
        };

        let evaluation = normalize_evaluation(&value, &question.id);
        let answer = Answer::new(question.id.clone(), cmd.answer_text.clone());

        let recorded = evaluation.clone();
        let updated = self
            .store
            .update(
                &cmd.session_id,
                Box::new(move |mut s| {
                    // Re-derives the duplicate/status guards on the freshest
                    // state the store can read.
                    s.record_evaluation(answer, recorded)?;
                    Ok(s)
                }),
            )
            .await?
            .ok_or(InterviewError::NotFound(cmd.session_id))?;

        let completed = updated.status().is_terminal();
        tracing::info!(
            question_id = %question.id,
            overall = evaluation.overall.value(),
            completed,
            "answer evaluated"
        );

        Ok(SubmitAnswerResult {
            session: updated,
            evaluation,
            completed,
        })
    }

    /// Best-effort abuse guard. A failing limiter backend fails open: the
    /// submission proceeds and the failure is logged.
    async fn check_rate_limit(&self, origin: Option<&str>) -> Result<(), InterviewError> {
        let Some(origin) = origin else {
            return Ok(());
        };
        let key = RateLimitKey::origin_resource(origin, ANSWERS_RESOURCE);
        match self.rate_limiter.check(key).await {
            Ok(RateLimitResult::Allowed(_)) => Ok(()),
            Ok(RateLimitResult::Denied(denied)) => Err(InterviewError::RateLimited {
                retry_after_secs: denied.retry_after_secs,
            }),
            Err(err) => {
                tracing::warn!(error = %err, "rate limiter unavailable; allowing request");
                Ok(())
            }
        }
    }
}
