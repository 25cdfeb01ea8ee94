//! Hireflow server binary.
//!
//! Wires the adapters to the lifecycle handlers and serves the interview
//! API over HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hireflow::adapters::ai::{OpenAiConfig, OpenAiReasoningService};
use hireflow::adapters::audit::InMemoryAuditLog;
use hireflow::adapters::http::{interview_routes, InterviewHandlers};
use hireflow::adapters::rate_limiter::InMemoryRateLimiter;
use hireflow::adapters::store::PostgresSessionStore;
use hireflow::application::handlers::interview::{
    CreateInterviewHandler, GenerateQuestionsHandler, GenerateReportHandler, GetInterviewHandler,
    GetReportHandler, ListInterviewsHandler, LogIntegrityEventHandler, NavigateHandler,
    ReasoningBudgets, SubmitAnswerHandler,
};
use hireflow::config::AppConfig;
use hireflow::ports::{AuditLog, RateLimiter, ReasoningService, SessionStore};

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");
    }

    let store: Arc<dyn SessionStore> = Arc::new(PostgresSessionStore::new(pool));
    let reasoning: Arc<dyn ReasoningService> = Arc::new(OpenAiReasoningService::new(
        OpenAiConfig::new(config.ai.api_key.clone().expect("validated above"))
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone()),
    ));
    let rate_limiter: Arc<dyn RateLimiter> =
        Arc::new(InMemoryRateLimiter::new(config.rate_limit.to_config()));
    let audit_log: Arc<dyn AuditLog> = Arc::new(InMemoryAuditLog::new());
    let budgets = ReasoningBudgets {
        question_timeout: config.ai.question_timeout(),
        evaluation_timeout: config.ai.evaluation_timeout(),
        report_timeout: config.ai.report_timeout(),
    };

    let handlers = InterviewHandlers::new(
        Arc::new(CreateInterviewHandler::new(store.clone())),
        Arc::new(GenerateQuestionsHandler::new(
            store.clone(),
            reasoning.clone(),
            budgets,
        )),
        Arc::new(SubmitAnswerHandler::new(
            store.clone(),
            reasoning.clone(),
            rate_limiter,
            budgets,
        )),
        Arc::new(NavigateHandler::new(store.clone())),
        Arc::new(GenerateReportHandler::new(
            store.clone(),
            reasoning,
            budgets,
        )),
        Arc::new(LogIntegrityEventHandler::new(store.clone(), audit_log)),
        Arc::new(GetInterviewHandler::new(store.clone())),
        Arc::new(GetReportHandler::new(store.clone())),
        Arc::new(ListInterviewsHandler::new(store)),
    );

    let app = Router::new()
        .nest("/api/interviews", interview_routes(handlers))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(CorsLayer::permissive()),
        );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "hireflow listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
