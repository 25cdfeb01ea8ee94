//! GenerateReportHandler - idempotent report synthesis.
//!
//! A cached report is returned without touching the reasoning service.
//! The share token is minted exactly once, inside the same write that
//! persists the report, so a failed upstream call can never leak a token
//! for a report that does not exist.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, ShareToken};
use crate::domain::interview::normalizer::{normalize_report, parse_model_json, ParseOutcome};
use crate::domain::interview::{InterviewError, Report};
use crate::ports::{ReasoningPurpose, ReasoningRequest, ReasoningService, SessionStore};

use super::prompts::{build_report_prompt, REPORT_SYSTEM_PROMPT};
use super::ReasoningBudgets;

/// Generation budget for report synthesis; the transcript is the input,
/// so the output budget is larger than the per-answer path.
const REPORT_MAX_TOKENS: u32 = 4_096;

/// Command to generate (or fetch) the final report.
#[derive(Debug, Clone)]
pub struct GenerateReportCommand {
    pub session_id: SessionId,
}

/// Result of report generation.
#[derive(Debug, Clone)]
pub struct GenerateReportResult {
    pub report: Report,
    pub share_token: ShareToken,
    /// True when an existing report was returned unchanged.
    pub cache_hit: bool,
}

/// Handler for report generation.
pub struct GenerateReportHandler {
    store: Arc<dyn SessionStore>,
    reasoning: Arc<dyn ReasoningService>,
    budgets: ReasoningBudgets,
}

impl GenerateReportHandler {
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
        cmd: GenerateReportCommand,
    ) -> Result<GenerateReportResult, InterviewError> {
        let session = self
            .store
            .get(&cmd.session_id)
            .await?
            .ok_or(InterviewError::NotFound(cmd.session_id))?;

        // Cache hit: report and token already exist together.
        if let (Some(report), Some(token)) = (session.report(), session.share_token()) {
            tracing::debug!("report already generated; returning cached copy");
            return Ok(GenerateReportResult {
                report: report.clone(),
                share_token: token.clone(),
                cache_hit: true,
            });
        }

        if !session.status().is_terminal() {
            return Err(InterviewError::NotCompleted);
        }

        let request = ReasoningRequest::new(
            build_report_prompt(&session),
            ReasoningPurpose::ReportSynthesis,
        )
        .with_system(REPORT_SYSTEM_PROMPT)
        .with_max_tokens(REPORT_MAX_TOKENS)
        .with_timeout(self.budgets.report_timeout);

        let raw = self.reasoning.complete(request).await?;

        let value = match parse_model_json(&raw) {
            ParseOutcome::Parsed(value) => value,
            ParseOutcome::ParseFailed { .. } => {
                tracing::warn!("report synthesis returned unparsable content");
                return Err(InterviewError::upstream_parse_failure(&raw));
            }
        };

        let report = normalize_report(&value, session.summary(), session.integrity_summary());
        let token = ShareToken::mint();

        let attached = report.clone();
        let updated = self
            .store
            .update(
                &cmd.session_id,
                Box::new(move |mut s| {
                    // A racing call may have persisted a report first; its
                    // copy (and its token) wins.
                    if s.report().is_some() {
                        return Ok(s);
                    }
                    s.attach_report(attached, token)?;
                    Ok(s)
                }),
            )
            .await?
            .ok_or(InterviewError::NotFound(cmd.session_id))?;

        self.verify_read_after_write(&cmd.session_id).await;

        let report = updated
            .report()
            .cloned()
            .ok_or_else(|| InterviewError::infrastructure("report missing after write"))?;
        let share_token = updated
            .share_token()
            .cloned()
            .ok_or_else(|| InterviewError::infrastructure("share token missing after write"))?;

        tracing::info!(
            recommendation = %report.recommendation,
            confidence = report.confidence,
            "report generated"
        );
        Ok(GenerateReportResult {
            report,
            share_token,
            cache_hit: false,
        })
    }

    /// Advisory re-fetch to detect replica lag after the report write.
    /// Logs at warn on mismatch; never affects the response.
    async fn verify_read_after_write(&self, session_id: &SessionId) {
        match self.store.get(session_id).await {
            Ok(Some(check)) if check.report().is_none() => {
                tracing::warn!(
                    session_id = %session_id,
                    "read-after-write verification did not observe the report (replica lag?)"
                );
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %err,
                    "read-after-write verification failed"
                );
            }
        }
    }
}
