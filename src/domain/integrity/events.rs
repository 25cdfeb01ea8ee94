//! Integrity signal vocabulary.
//!
//! Signals originate from a best-effort, untrusted browser-side producer.
//! This module only defines the ingestion vocabulary; nothing here assumes
//! the signals are accurate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Event name for a tab losing focus. Blur events drive the derived
/// tab-switch counter.
pub const TAB_BLUR: &str = "tab_blur";

/// Event name for a tab regaining focus.
pub const TAB_FOCUS: &str = "tab_focus";

/// Event names mirrored to the durable audit trail in addition to the
/// bounded in-session window.
pub const CRITICAL_EVENTS: &[&str] = &[
    "devtools_open",
    "screenshot_attempt",
    "clipboard_blocked",
    "shortcut_blocked",
    "extended_absence",
];

/// Returns true if the named event must survive window eviction.
pub fn is_critical(event: &str) -> bool {
    CRITICAL_EVENTS.contains(&event)
}

/// One browser-observed signal, as ingested.
///
/// Event names outside the known vocabulary are accepted as-is; only the
/// critical subset gets special treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Freeform event name, e.g. `tab_blur`, `devtools_open`.
    pub event: String,
    /// Optional structured payload from the producer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// When the event was ingested (server clock, not producer clock).
    pub recorded_at: Timestamp,
}

impl SecurityEvent {
    /// Creates an event recorded now.
    pub fn new(event: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self {
            event: event.into(),
            details,
            recorded_at: Timestamp::now(),
        }
    }

    /// Returns true if this event is a tab blur.
    pub fn is_blur(&self) -> bool {
        self.event == TAB_BLUR
    }

    /// Returns true if this event must be mirrored to the audit trail.
    pub fn is_critical(&self) -> bool {
        is_critical(&self.event)
    }
}
