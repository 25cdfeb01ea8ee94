//! Audit log port for critical integrity events.
//!
//! Critical events are mirrored here in addition to the session's bounded
//! in-memory window, so they survive the window's eviction policy.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId, Timestamp};
use crate::domain::integrity::SecurityEvent;

/// One durable audit record.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    /// Session the event belongs to.
    pub session_id: SessionId,
    /// Event name, e.g. `devtools_open`.
    pub event: String,
    /// Optional structured payload from the producer.
    pub details: Option<serde_json::Value>,
    /// When the event was ingested.
    pub recorded_at: Timestamp,
}

impl AuditEntry {
    /// Builds an entry from an ingested event.
    pub fn from_event(session_id: SessionId, event: &SecurityEvent) -> Self {
        Self {
            session_id,
            event: event.event.clone(),
            details: event.details.clone(),
            recorded_at: event.recorded_at,
        }
    }
}

/// Port for the durable audit trail.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Appends one entry.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_copies_event_fields() {
        let session_id = SessionId::new();
        let event = SecurityEvent::new("devtools_open", Some(json!({"width": 900})));
        let entry = AuditEntry::from_event(session_id, &event);
        assert_eq!(entry.session_id, session_id);
        assert_eq!(entry.event, "devtools_open");
        assert_eq!(entry.details, Some(json!({"width": 900})));
        assert_eq!(entry.recorded_at, event.recorded_at);
    }

    #[test]
    fn audit_log_is_object_safe() {
        fn _accepts_dyn(_log: &dyn AuditLog) {}
    }
}
