//! Integrity signal tracking.
//!
//! Ingests browser-observed security and tab-visibility events into a
//! volume-bounded per-session window, and decides which events warrant a
//! durable audit record. Detection accuracy is the producer's problem;
//! this module treats every signal as untrusted input.

mod events;
mod window;

pub use events::{is_critical, SecurityEvent, CRITICAL_EVENTS, TAB_BLUR, TAB_FOCUS};
pub use window::{IntegrityWindow, MAX_EVENT_WINDOW};
