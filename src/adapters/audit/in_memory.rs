//! In-memory audit log.
//!
//! Records entries in process memory and emits each as a structured
//! tracing event, so critical integrity signals are visible in logs even
//! on deployments without a durable audit backend.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{AuditEntry, AuditLog};

/// In-memory audit log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries, oldest first.
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }

    /// Number of recorded entries.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError> {
        tracing::warn!(
            session_id = %entry.session_id,
            event = %entry.event,
            "audit: critical integrity event"
        );
        self.entries.write().await.push(entry);
        Ok(())
    }
}
