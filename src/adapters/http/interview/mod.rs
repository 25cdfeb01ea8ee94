//! HTTP adapter for interview endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::InterviewHandlers;
pub use routes::interview_routes;
