//! Bounded in-session integrity window.
//!
//! The window keeps only the most recent events. Derived counts are
//! computed from the retained events rather than stored as independent
//! counters, so the count can never drift from the underlying log.

use serde::{Deserialize, Serialize};

use super::events::SecurityEvent;
use crate::domain::interview::IntegritySummary;

/// Maximum number of events retained per session.
pub const MAX_EVENT_WINDOW: usize = 100;

/// Volume-bounded, append-only event window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IntegrityWindow {
    events: Vec<SecurityEvent>,
}

impl IntegrityWindow {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructs a window from persisted events, re-applying the bound.
    pub fn from_events(mut events: Vec<SecurityEvent>) -> Self {
        if events.len() > MAX_EVENT_WINDOW {
            events.drain(..events.len() - MAX_EVENT_WINDOW);
        }
        Self { events }
    }

    /// Appends an event, evicting the oldest when the window is full.
    pub fn record(&mut self, event: SecurityEvent) {
        if self.events.len() == MAX_EVENT_WINDOW {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Returns the retained events, oldest first.
    pub fn events(&self) -> &[SecurityEvent] {
        &self.events
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events were retained.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Derived tab-switch counter: blur events in the retained window.
    pub fn tab_switch_count(&self) -> u32 {
        self.events.iter().filter(|e| e.is_blur()).count() as u32
    }

    /// Critical event names, deduplicated, in first-seen order.
    pub fn critical_event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for event in &self.events {
            if event.is_critical() && !names.iter().any(|n| n == &event.event) {
                names.push(event.event.clone());
            }
        }
        names
    }

    /// Builds the report's integrity block.
    ///
    /// Returns `None` when the session recorded no signals at all, so empty
    /// sessions produce reports without an integrity section.
    pub fn summary(&self) -> Option<IntegritySummary> {
        if self.events.is_empty() {
            return None;
        }
        Some(IntegritySummary {
            tab_switches: self.tab_switch_count(),
            security_event_count: self.events.len() as u32,
            critical_events: self.critical_event_names(),
        })
    }
}
