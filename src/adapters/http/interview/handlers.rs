//! HTTP handlers for interview endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::interview::{
    CreateInterviewCommand, CreateInterviewHandler, GenerateQuestionsCommand,
    GenerateQuestionsHandler, GenerateReportCommand, GenerateReportHandler, GetInterviewHandler,
    GetInterviewQuery, GetReportHandler, GetReportQuery, InterviewFilter, ListInterviewsHandler,
    LogIntegrityEventCommand, LogIntegrityEventHandler, NavigateCommand, NavigateHandler,
    SubmitAnswerCommand, SubmitAnswerHandler,
};
use crate::domain::foundation::{SessionId, TemplateId};
use crate::domain::interview::{IntakeContext, InterviewError};

use super::dto::{
    CreateInterviewRequest, ErrorResponse, InterviewListResponse, InterviewResponse,
    InterviewSummaryResponse, ListInterviewsQuery, LogEventRequest, LogEventResponse,
    NavigateRequest, NavigateResponse, QuestionResponse, ReportAccessQuery, ReportResponse,
    SubmitAnswerRequest, SubmitAnswerResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InterviewHandlers {
    create_handler: Arc<CreateInterviewHandler>,
    generate_handler: Arc<GenerateQuestionsHandler>,
    submit_handler: Arc<SubmitAnswerHandler>,
    navigate_handler: Arc<NavigateHandler>,
    report_handler: Arc<GenerateReportHandler>,
    log_event_handler: Arc<LogIntegrityEventHandler>,
    get_handler: Arc<GetInterviewHandler>,
    get_report_handler: Arc<GetReportHandler>,
    list_handler: Arc<ListInterviewsHandler>,
}

impl InterviewHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreateInterviewHandler>,
        generate_handler: Arc<GenerateQuestionsHandler>,
        submit_handler: Arc<SubmitAnswerHandler>,
        navigate_handler: Arc<NavigateHandler>,
        report_handler: Arc<GenerateReportHandler>,
        log_event_handler: Arc<LogIntegrityEventHandler>,
        get_handler: Arc<GetInterviewHandler>,
        get_report_handler: Arc<GetReportHandler>,
        list_handler: Arc<ListInterviewsHandler>,
    ) -> Self {
        Self {
            create_handler,
            generate_handler,
            submit_handler,
            navigate_handler,
            report_handler,
            log_event_handler,
            get_handler,
            get_report_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/interviews - Create a new interview session
pub async fn create_interview(
    State(handlers): State<InterviewHandlers>,
    Json(req): Json<CreateInterviewRequest>,
) -> Response {
    let template_id = match req.template_id.map(TemplateId::new).transpose() {
        Ok(template_id) => template_id,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(err.to_string())),
            )
                .into_response()
        }
    };

    let cmd = CreateInterviewCommand {
        mode: req.mode,
        intake: IntakeContext {
            candidate_name: req.candidate_name,
            role: req.role,
            level: req.level,
            template_id,
            job_description: req.job_description,
        },
        seed_text: req.seed_text,
        target_question_count: req.question_count,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(session) => {
            let response: InterviewResponse = (&session).into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/interviews - List sessions by filter
pub async fn list_interviews(
    State(handlers): State<InterviewHandlers>,
    Query(query): Query<ListInterviewsQuery>,
) -> Response {
    let filter = if let Some(ids) = query.ids {
        let parsed: Result<Vec<SessionId>, _> =
            ids.split(',').map(|id| id.trim().parse()).collect();
        match parsed {
            Ok(ids) => InterviewFilter::ByIds(ids),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request("Invalid session id in 'ids'")),
                )
                    .into_response()
            }
        }
    } else if let Some(template_id) = query.template_id {
        match TemplateId::new(template_id) {
            Ok(template_id) => InterviewFilter::ByTemplate(template_id),
            Err(err) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(err.to_string())),
                )
                    .into_response()
            }
        }
    } else if let Some(mode) = query.mode {
        InterviewFilter::ByMode(mode)
    } else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Provide one of 'mode', 'template_id', or 'ids'",
            )),
        )
            .into_response();
    };

    match handlers.list_handler.handle(filter).await {
        Ok(sessions) => {
            let items: Vec<InterviewSummaryResponse> =
                sessions.iter().map(Into::into).collect();
            let total = items.len();
            (
                StatusCode::OK,
                Json(InterviewListResponse { items, total }),
            )
                .into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/interviews/:id - Get session details
pub async fn get_interview(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetInterviewQuery { session_id })
        .await
    {
        Ok(session) => {
            let response: InterviewResponse = (&session).into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/interviews/:id/questions - Generate the question set
pub async fn generate_questions(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .generate_handler
        .handle(GenerateQuestionsCommand { session_id })
        .await
    {
        Ok(result) => {
            let response: InterviewResponse = (&result.session).into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/interviews/:id/answers - Submit the answer to the current question
pub async fn submit_answer(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<SubmitAnswerRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitAnswerCommand {
        session_id,
        answer_text: req.answer,
        origin: caller_origin(&headers),
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response = SubmitAnswerResponse {
                evaluation: (&result.evaluation).into(),
                completed: result.completed,
                current_question_index: result.session.current_question_index(),
                summary: result.session.summary().into(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/interviews/:id/navigate - Move the cursor
pub async fn navigate(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<NavigateRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = NavigateCommand {
        session_id,
        direction: req.direction,
    };

    match handlers.navigate_handler.handle(cmd).await {
        Ok(result) => {
            let response = NavigateResponse {
                current_question_index: result.current_question_index,
                question: result.session.current_question().map(QuestionResponse::from),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/interviews/:id/report - Generate (or fetch) the final report
pub async fn generate_report(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .report_handler
        .handle(GenerateReportCommand { session_id })
        .await
    {
        Ok(result) => {
            let response = ReportResponse::from_report(
                &result.report,
                Some(result.share_token.as_str().to_string()),
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/interviews/:id/report - Read-only report access
///
/// With a `token` query parameter this is the external share path; the
/// token must match the one minted at generation.
pub async fn get_report(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
    Query(query): Query<ReportAccessQuery>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_report_handler
        .handle(GetReportQuery {
            session_id,
            share_token: query.token,
        })
        .await
    {
        Ok(report) => {
            let response = ReportResponse::from_report(&report, None);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/interviews/:id/events - Log an integrity event
pub async fn log_event(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<LogEventRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = LogIntegrityEventCommand {
        session_id,
        event: req.event,
        details: req.details,
    };

    match handlers.log_event_handler.handle(cmd).await {
        Ok(result) => {
            let response = LogEventResponse {
                recorded: result.recorded,
                audited: result.audited,
                tab_switches: result.tab_switches,
            };
            // Accepted even when the window is frozen (completed session).
            (StatusCode::ACCEPTED, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

/// Best-effort caller identity for rate limiting: the first hop in
/// X-Forwarded-For, if present.
fn caller_origin(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_interview_error(error: InterviewError) -> Response {
    let code = error.code().to_string();
    let message = error.message();
    let status = match &error {
        InterviewError::NotFound(_) => StatusCode::NOT_FOUND,
        InterviewError::ValidationFailed { .. }
        | InterviewError::QuestionsNotGenerated
        | InterviewError::CursorOutOfRange { .. } => StatusCode::BAD_REQUEST,
        InterviewError::DuplicateEvaluation { .. }
        | InterviewError::SessionCompleted
        | InterviewError::NotCompleted => StatusCode::CONFLICT,
        InterviewError::UpstreamParseFailure { .. }
        | InterviewError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
        InterviewError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        InterviewError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(code, message))).into_response()
}
