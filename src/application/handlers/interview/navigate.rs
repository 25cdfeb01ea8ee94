//! NavigateHandler - manual cursor movement.
//!
//! Pure cursor arithmetic on the aggregate: no re-evaluation, no status
//! change. Out-of-range moves are rejected.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::interview::{InterviewError, InterviewSession, NavigationDirection};
use crate::ports::SessionStore;

/// Command to move the cursor by one.
#[derive(Debug, Clone)]
pub struct NavigateCommand {
    pub session_id: SessionId,
    pub direction: NavigationDirection,
}

/// Result of navigation.
#[derive(Debug, Clone)]
pub struct NavigateResult {
    pub session: InterviewSession,
    pub current_question_index: usize,
}

/// Handler for navigation.
pub struct NavigateHandler {
    store: Arc<dyn SessionStore>,
}

impl NavigateHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: NavigateCommand) -> Result<NavigateResult, InterviewError> {
        let direction = cmd.direction;
        let updated = self
            .store
            .update(
                &cmd.session_id,
                Box::new(move |mut s| {
                    s.navigate(direction)?;
                    Ok(s)
                }),
            )
            .await?
            .ok_or(InterviewError::NotFound(cmd.session_id))?;

        let index = updated.current_question_index();
        Ok(NavigateResult {
            session: updated,
            current_question_index: index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemorySessionStore;
    use crate::domain::foundation::InterviewStatus;
    use crate::domain::interview::{
        Difficulty, IntakeContext, InterviewMode, InterviewSession, Question, QuestionCategory,
    };

    async fn in_progress_session(store: &InMemorySessionStore) -> SessionId {
        let mut session = InterviewSession::new(
            SessionId::new(),
            InterviewMode::SelfServe,
            IntakeContext::default(),
            "Frontend engineer with a strong accessibility background overall.".to_string(),
            3,
        )
        .unwrap();
        session
            .attach_questions(
                (1..=3)
                    .map(|n| Question {
                        id: Question::fallback_id(n),
                        text: format!("Question {}?", n),
                        category: QuestionCategory::General,
                        difficulty: Difficulty::Medium,
                    })
                    .collect(),
            )
            .unwrap();
        let id = *session.id();
        store.create(&session).await.unwrap();
        id
    }

    #[tokio::test]
    async fn next_then_previous_round_trips() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = in_progress_session(&store).await;
        let handler = NavigateHandler::new(store);

        let result = handler
            .handle(NavigateCommand {
                session_id: id,
                direction: NavigationDirection::Next,
            })
            .await
            .unwrap();
        assert_eq!(result.current_question_index, 1);

        let result = handler
            .handle(NavigateCommand {
                session_id: id,
                direction: NavigationDirection::Previous,
            })
            .await
            .unwrap();
        assert_eq!(result.current_question_index, 0);
    }

    #[tokio::test]
    async fn previous_from_first_question_is_rejected() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = in_progress_session(&store).await;
        let handler = NavigateHandler::new(store.clone());

        let result = handler
            .handle(NavigateCommand {
                session_id: id,
                direction: NavigationDirection::Previous,
            })
            .await;

        assert!(matches!(
            result,
            Err(InterviewError::CursorOutOfRange { .. })
        ));
        let session = store.get(&id).await.unwrap().unwrap();
        assert_eq!(session.current_question_index(), 0);
    }

    #[tokio::test]
    async fn navigation_does_not_change_status() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = in_progress_session(&store).await;
        let handler = NavigateHandler::new(store.clone());

        handler
            .handle(NavigateCommand {
                session_id: id,
                direction: NavigationDirection::Next,
            })
            .await
            .unwrap();

        let session = store.get(&id).await.unwrap().unwrap();
        assert_eq!(session.status(), InterviewStatus::InProgress);
        assert!(session.evaluations().is_empty());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = NavigateHandler::new(store);

        let result = handler
            .handle(NavigateCommand {
                session_id: SessionId::new(),
                direction: NavigationDirection::Next,
            })
            .await;

        assert!(matches!(result, Err(InterviewError::NotFound(_))));
    }
}
