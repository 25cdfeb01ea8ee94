//! LogIntegrityEventHandler - integrity signal ingestion.
//!
//! Events are accepted in any non-terminal status, including `created`,
//! because some signals originate during setup. A completed session's
//! window is frozen: the event is dropped and reported as an accepted
//! no-op. Critical events are additionally mirrored to the durable audit
//! trail so they survive window eviction.

use std::sync::{Arc, Mutex};

use crate::domain::foundation::SessionId;
use crate::domain::integrity::SecurityEvent;
use crate::domain::interview::{IngestOutcome, InterviewError};
use crate::ports::{AuditEntry, AuditLog, SessionStore};

/// Command to ingest one integrity signal.
#[derive(Debug, Clone)]
pub struct LogIntegrityEventCommand {
    pub session_id: SessionId,
    /// Freeform event name from the producer's vocabulary.
    pub event: String,
    /// Optional structured payload.
    pub details: Option<serde_json::Value>,
}

/// Result of signal ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogIntegrityEventResult {
    /// False when the session was already completed (frozen window).
    pub recorded: bool,
    /// True when the event was mirrored to the audit trail.
    pub audited: bool,
    /// Derived blur count after ingestion.
    pub tab_switches: u32,
}

/// Handler for integrity signal ingestion.
pub struct LogIntegrityEventHandler {
    store: Arc<dyn SessionStore>,
    audit_log: Arc<dyn AuditLog>,
}

impl LogIntegrityEventHandler {
    pub fn new(store: Arc<dyn SessionStore>, audit_log: Arc<dyn AuditLog>) -> Self {
        Self { store, audit_log }
    }

    pub async fn handle(
        &self,
        cmd: LogIntegrityEventCommand,
    ) -> Result<LogIntegrityEventResult, InterviewError> {
        let event = SecurityEvent::new(cmd.event, cmd.details);

        let outcome_slot: Arc<Mutex<Option<IngestOutcome>>> = Arc::new(Mutex::new(None));
        let slot = outcome_slot.clone();
        let ingested = event.clone();

        let updated = self
            .store
            .update(
                &cmd.session_id,
                Box::new(move |mut s| {
                    let outcome = s.record_security_event(ingested);
                    *slot.lock().unwrap() = Some(outcome);
                    Ok(s)
                }),
            )
            .await?
            .ok_or(InterviewError::NotFound(cmd.session_id))?;

        let outcome = outcome_slot
            .lock()
            .unwrap()
            .take()
            .expect("mutation ran for an existing session");

        let (recorded, audit_worthy) = match outcome {
            IngestOutcome::Recorded { audit_worthy } => (true, audit_worthy),
            IngestOutcome::WindowFrozen => (false, false),
        };

        let mut audited = false;
        if audit_worthy {
            self.audit_log
                .record(AuditEntry::from_event(cmd.session_id, &event))
                .await?;
            audited = true;
            tracing::warn!(
                session_id = %cmd.session_id,
                event = %event.event,
                "critical integrity event recorded"
            );
        }

        Ok(LogIntegrityEventResult {
            recorded,
            audited,
            tab_switches: updated.integrity().tab_switch_count(),
        })
    }
}
