//! GetInterviewHandler / GetReportHandler - read-side queries.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, ShareToken};
use crate::domain::interview::{InterviewError, InterviewSession, Report};
use crate::ports::SessionStore;

/// Query for one session by id.
#[derive(Debug, Clone)]
pub struct GetInterviewQuery {
    pub session_id: SessionId,
}

/// Handler for fetching a session.
pub struct GetInterviewHandler {
    store: Arc<dyn SessionStore>,
}

impl GetInterviewHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetInterviewQuery,
    ) -> Result<InterviewSession, InterviewError> {
        self.store
            .get(&query.session_id)
            .await?
            .ok_or(InterviewError::NotFound(query.session_id))
    }
}

/// Query for a session's cached report.
///
/// When `share_token` is present the caller is external and the token must
/// match the one minted at report generation; a mismatch reads the same as
/// an absent report so tokens cannot be probed.
#[derive(Debug, Clone)]
pub struct GetReportQuery {
    pub session_id: SessionId,
    pub share_token: Option<String>,
}

/// Handler for read-only report access.
pub struct GetReportHandler {
    store: Arc<dyn SessionStore>,
}

impl GetReportHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetReportQuery) -> Result<Report, InterviewError> {
        let session = self
            .store
            .get(&query.session_id)
            .await?
            .ok_or(InterviewError::NotFound(query.session_id))?;

        if let Some(candidate) = &query.share_token {
            let authorized = session
                .share_token()
                .map(|token: &ShareToken| token.matches(candidate))
                .unwrap_or(false);
            if !authorized {
                return Err(InterviewError::NotFound(query.session_id));
            }
        }

        session
            .report()
            .cloned()
            .ok_or(InterviewError::NotFound(query.session_id))
    }
}
