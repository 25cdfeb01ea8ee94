//! HTTP adapters - REST API implementations.

pub mod interview;

// Re-export key types for convenience
pub use interview::interview_routes;
pub use interview::InterviewHandlers;
