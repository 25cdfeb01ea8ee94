//! In-memory session store for testing and single-process development.
//!
//! Holds sessions in a HashMap behind an async RwLock. The update
//! primitive happens to be atomic here because the write lock spans the
//! read-modify-write, but callers must not rely on that: the port
//! contract promises last-write-wins only.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, TemplateId};
use crate::domain::interview::{InterviewMode, InterviewSession};
use crate::ports::{SessionMutation, SessionStore};

/// In-memory session store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, InterviewSession>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions (test helper).
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: &InterviewSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Session already exists: {}", session.id()),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<InterviewSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        id: &SessionId,
        mutation: SessionMutation,
    ) -> Result<Option<InterviewSession>, DomainError> {
        let mut sessions = self.sessions.write().await;
        let Some(current) = sessions.get(id).cloned() else {
            return Ok(None);
        };
        let updated = mutation(current)?;
        sessions.insert(*id, updated.clone());
        Ok(Some(updated))
    }

    async fn list_by_ids(
        &self,
        ids: &[SessionId],
    ) -> Result<Vec<InterviewSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| sessions.get(id).cloned())
            .collect())
    }

    async fn list_by_mode(
        &self,
        mode: InterviewMode,
    ) -> Result<Vec<InterviewSession>, DomainError> {
        let sessions = self.sessions.read().await;
        let mut matches: Vec<InterviewSession> = sessions
            .values()
            .filter(|s| s.mode() == mode)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(matches)
    }

    async fn list_by_template(
        &self,
        template_id: &TemplateId,
    ) -> Result<Vec<InterviewSession>, DomainError> {
        let sessions = self.sessions.read().await;
        let mut matches: Vec<InterviewSession> = sessions
            .values()
            .filter(|s| s.intake().template_id.as_ref() == Some(template_id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(matches)
    }
}
