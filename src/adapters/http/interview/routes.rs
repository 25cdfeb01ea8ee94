//! HTTP routes for interview endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_interview, generate_questions, generate_report, get_interview, get_report,
    list_interviews, log_event, navigate, submit_answer, InterviewHandlers,
};

/// Creates the interview router with all endpoints.
pub fn interview_routes(handlers: InterviewHandlers) -> Router {
    Router::new()
        .route("/", post(create_interview))
        .route("/", get(list_interviews))
        .route("/:id", get(get_interview))
        .route("/:id/questions", post(generate_questions))
        .route("/:id/answers", post(submit_answer))
        .route("/:id/navigate", post(navigate))
        .route("/:id/report", post(generate_report))
        .route("/:id/report", get(get_report))
        .route("/:id/events", post(log_event))
        .with_state(handlers)
}
