//! PostgreSQL implementation of SessionStore.
//!
//! Persists each session as a JSONB document alongside the columns the
//! filtered reads need. The update primitive is a plain read-modify-write
//! (no row lock, no compare-and-swap), exactly the guarantee level the
//! port contract advertises: concurrent writers resolve last-write-wins.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, TemplateId};
use crate::domain::interview::{InterviewMode, InterviewSession};
use crate::ports::{SessionMutation, SessionStore};

/// PostgreSQL session store.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn db_error(context: &str, err: impl std::fmt::Display) -> DomainError {
        DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
    }

    fn to_document(session: &InterviewSession) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(session)
            .map_err(|e| Self::db_error("Failed to serialize session", e))
    }

    fn from_document(document: serde_json::Value) -> Result<InterviewSession, DomainError> {
        serde_json::from_value(document)
            .map_err(|e| Self::db_error("Failed to deserialize session", e))
    }

    fn mode_str(mode: InterviewMode) -> &'static str {
        match mode {
            InterviewMode::RecruiterLed => "recruiter_led",
            InterviewMode::Cohort => "cohort",
            InterviewMode::SelfServe => "self_serve",
        }
    }

    fn rows_to_sessions(
        rows: Vec<sqlx::postgres::PgRow>,
    ) -> Result<Vec<InterviewSession>, DomainError> {
        rows.into_iter()
            .map(|row| Self::from_document(row.get("document")))
            .collect()
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn create(&self, session: &InterviewSession) -> Result<(), DomainError> {
        let document = Self::to_document(session)?;
        sqlx::query(
            r#"
            INSERT INTO interview_sessions (id, mode, template_id, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(Self::mode_str(session.mode()))
        .bind(session.intake().template_id.as_ref().map(|t| t.as_str()))
        .bind(document)
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_error("Failed to insert session", e))?;

        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<InterviewSession>, DomainError> {
        let row = sqlx::query("SELECT document FROM interview_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_error("Failed to fetch session", e))?;

        match row {
            Some(row) => Ok(Some(Self::from_document(row.get("document"))?)),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        id: &SessionId,
        mutation: SessionMutation,
    ) -> Result<Option<InterviewSession>, DomainError> {
        let Some(current) = self.get(id).await? else {
            return Ok(None);
        };

        let updated = mutation(current)?;
        let document = Self::to_document(&updated)?;

        sqlx::query(
            r#"
            UPDATE interview_sessions
            SET mode = $2, template_id = $3, document = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(Self::mode_str(updated.mode()))
        .bind(updated.intake().template_id.as_ref().map(|t| t.as_str()))
        .bind(document)
        .bind(updated.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_error("Failed to update session", e))?;

        Ok(Some(updated))
    }

    async fn list_by_ids(
        &self,
        ids: &[SessionId],
    ) -> Result<Vec<InterviewSession>, DomainError> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(
            "SELECT document FROM interview_sessions WHERE id = ANY($1) ORDER BY updated_at DESC",
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::db_error("Failed to fetch sessions by ids", e))?;

        Self::rows_to_sessions(rows)
    }

    async fn list_by_mode(
        &self,
        mode: InterviewMode,
    ) -> Result<Vec<InterviewSession>, DomainError> {
        let rows = sqlx::query(
            "SELECT document FROM interview_sessions WHERE mode = $1 ORDER BY updated_at DESC",
        )
        .bind(Self::mode_str(mode))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::db_error("Failed to fetch sessions by mode", e))?;

        Self::rows_to_sessions(rows)
    }

    async fn list_by_template(
        &self,
        template_id: &TemplateId,
    ) -> Result<Vec<InterviewSession>, DomainError> {
        let rows = sqlx::query(
            "SELECT document FROM interview_sessions WHERE template_id = $1 ORDER BY updated_at DESC",
        )
        .bind(template_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::db_error("Failed to fetch sessions by template", e))?;

        Self::rows_to_sessions(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interview::IntakeContext;

    #[test]
    fn mode_strings_match_wire_format() {
        assert_eq!(
            PostgresSessionStore::mode_str(InterviewMode::RecruiterLed),
            "recruiter_led"
        );
        assert_eq!(
            PostgresSessionStore::mode_str(InterviewMode::SelfServe),
            "self_serve"
        );
    }

    #[test]
    fn session_document_round_trips() {
        let session = InterviewSession::new(
            SessionId::new(),
            InterviewMode::SelfServe,
            IntakeContext::default(),
            "A seed text that is comfortably past the fifty character minimum.".to_string(),
            3,
        )
        .unwrap();

        let document = PostgresSessionStore::to_document(&session).unwrap();
        let restored = PostgresSessionStore::from_document(document).unwrap();
        assert_eq!(restored, session);
    }
}
