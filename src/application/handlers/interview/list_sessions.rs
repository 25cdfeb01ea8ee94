//! ListInterviewsHandler - filtered bulk reads for dashboards.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, TemplateId};
use crate::domain::interview::{InterviewError, InterviewMode, InterviewSession};
use crate::ports::SessionStore;

/// Filter for bulk session reads.
#[derive(Debug, Clone)]
pub enum InterviewFilter {
    ByIds(Vec<SessionId>),
    ByMode(InterviewMode),
    ByTemplate(TemplateId),
}

/// Handler for filtered session listing.
pub struct ListInterviewsHandler {
    store: Arc<dyn SessionStore>,
}

impl ListInterviewsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        filter: InterviewFilter,
    ) -> Result<Vec<InterviewSession>, InterviewError> {
        let sessions = match filter {
            InterviewFilter::ByIds(ids) => self.store.list_by_ids(&ids).await?,
            InterviewFilter::ByMode(mode) => self.store.list_by_mode(mode).await?,
            InterviewFilter::ByTemplate(template_id) => {
                self.store.list_by_template(&template_id).await?
            }
        };
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemorySessionStore;
    use crate::domain::interview::IntakeContext;

    async fn create(
        store: &InMemorySessionStore,
        mode: InterviewMode,
        template: Option<&str>,
    ) -> SessionId {
        let intake = IntakeContext {
            role: Some("Engineer".to_string()),
            level: Some("Mid".to_string()),
            template_id: template.map(|t| TemplateId::new(t).unwrap()),
            ..Default::default()
        };
        let session = InterviewSession::new(
            SessionId::new(),
            mode,
            intake,
            "A seed text that is comfortably past the fifty character minimum.".to_string(),
            3,
        )
        .unwrap();
        let id = *session.id();
        store.create(&session).await.unwrap();
        id
    }

    #[tokio::test]
    async fn filters_by_mode() {
        let store = Arc::new(InMemorySessionStore::new());
        create(&store, InterviewMode::SelfServe, None).await;
        create(&store, InterviewMode::RecruiterLed, None).await;
        let handler = ListInterviewsHandler::new(store);

        let sessions = handler
            .handle(InterviewFilter::ByMode(InterviewMode::SelfServe))
            .await
            .unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].mode(), InterviewMode::SelfServe);
    }

    #[tokio::test]
    async fn filters_by_ids_skipping_unknown() {
        let store = Arc::new(InMemorySessionStore::new());
        let known = create(&store, InterviewMode::SelfServe, None).await;
        let handler = ListInterviewsHandler::new(store);

        let sessions = handler
            .handle(InterviewFilter::ByIds(vec![known, SessionId::new()]))
            .await
            .unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(*sessions[0].id(), known);
    }

    #[tokio::test]
    async fn filters_by_template() {
        let store = Arc::new(InMemorySessionStore::new());
        create(&store, InterviewMode::Cohort, Some("apac-2026")).await;
        create(&store, InterviewMode::Cohort, Some("emea-2026")).await;
        let handler = ListInterviewsHandler::new(store);

        let sessions = handler
            .handle(InterviewFilter::ByTemplate(
                TemplateId::new("apac-2026").unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(sessions.len(), 1);
    }
}
