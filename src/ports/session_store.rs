//! Session store port.
//!
//! Narrow CRUD contract over the persistence layer: create, fetch by id,
//! read-modify-write update, and filtered bulk reads. The store is never
//! transactional across entities and the update primitive carries no
//! compare-and-swap guarantee, so callers re-derive idempotency from the
//! state the mutation closure observes rather than from client flags.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId, TemplateId};
use crate::domain::interview::{InterviewMode, InterviewSession};

/// Mutation applied inside the store's read-modify-write update.
///
/// The closure sees the freshest state the store can read; returning an
/// error aborts the write and propagates to the caller unchanged.
pub type SessionMutation =
    Box<dyn FnOnce(InterviewSession) -> Result<InterviewSession, DomainError> + Send + 'static>;

/// Repository port for interview session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Inserts a new session.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the id already exists
    /// - `DatabaseError` on persistence failure
    async fn create(&self, session: &InterviewSession) -> Result<(), DomainError>;

    /// Fetches a session by id.
    ///
    /// Returns `None` if not found. Reads may briefly lag writes on
    /// replicated backends; callers that care can re-fetch.
    async fn get(&self, id: &SessionId) -> Result<Option<InterviewSession>, DomainError>;

    /// Read-modify-write update.
    ///
    /// Reads the current state, applies `mutation`, and writes the result
    /// back. Returns `None` if the id is unknown. NOT guaranteed atomic
    /// across concurrent callers: two racing updates resolve as
    /// last-write-wins.
    ///
    /// # Errors
    ///
    /// - any error returned by the mutation closure, unchanged
    /// - `DatabaseError` on persistence failure
    async fn update(
        &self,
        id: &SessionId,
        mutation: SessionMutation,
    ) -> Result<Option<InterviewSession>, DomainError>;

    /// Fetches the sessions matching the given ids, skipping unknown ids.
    async fn list_by_ids(&self, ids: &[SessionId])
        -> Result<Vec<InterviewSession>, DomainError>;

    /// Fetches all sessions created through the given intake mode.
    async fn list_by_mode(&self, mode: InterviewMode)
        -> Result<Vec<InterviewSession>, DomainError>;

    /// Fetches all cohort sessions seeded from the given template.
    async fn list_by_template(
        &self,
        template_id: &TemplateId,
    ) -> Result<Vec<InterviewSession>, DomainError>;
}
