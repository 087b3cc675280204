//! Forms API /v1: the form service and its REST endpoints
//!
//! ```text
//! POST   /v1/forms                                    create a draft
//! GET    /v1/forms/{id}                               load
//! PUT    /v1/forms/{id}                               save (renumber + validate)
//! DELETE /v1/forms/{id}                               delete with its submissions
//! POST   /v1/forms/{id}/publish | /unpublish
//! POST   /v1/forms/{id}/questions                     add a question
//! DELETE /v1/forms/{id}/questions/{question_id}       remove a question
//! POST   /v1/forms/{id}/questions/{question_id}/type  change its type
//! POST   /v1/forms/{id}/reorder                       move a question
//! POST   /v1/forms/{id}/submissions                   submit answers
//! GET    /v1/forms/{id}/status                        may the caller still submit?
//! GET    /v1/forms/{id}/summary                       per-question summaries
//! GET    /v1/forms/{id}/responses                     per-submission views
//! GET    /v1/forms/{id}/questions/{question_id}/responses
//! GET    /v1/hotline                                  hotline discovery listing
//! ```
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod service;

use axum::{
    routing::{delete, get, post},
    Router,
};
use forms_core::{EngineConfig, InMemoryFormStore};
use metrics::FormsMetrics;
use service::FormService;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use service::{ResponsePage, SubmissionStatus, SubmitReceipt};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FormService>,
    pub metrics: Arc<FormsMetrics>,
}

impl AppState {
    pub fn new(service: FormService) -> Result<Self, prometheus::Error> {
        Ok(Self {
            service: Arc::new(service),
            metrics: Arc::new(FormsMetrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/forms", post(handlers::create_form))
        .route(
            "/v1/forms/{id}",
            get(handlers::get_form)
                .put(handlers::save_form)
                .delete(handlers::delete_form),
        )
        .route("/v1/forms/{id}/publish", post(handlers::publish))
        .route("/v1/forms/{id}/unpublish", post(handlers::unpublish))
        .route("/v1/forms/{id}/questions", post(handlers::add_question))
        .route(
            "/v1/forms/{id}/questions/{question_id}",
            delete(handlers::remove_question),
        )
        .route(
            "/v1/forms/{id}/questions/{question_id}/type",
            post(handlers::change_question_type),
        )
        .route(
            "/v1/forms/{id}/questions/{question_id}/responses",
            get(handlers::question_responses),
        )
        .route("/v1/forms/{id}/reorder", post(handlers::reorder_questions))
        .route("/v1/forms/{id}/submissions", post(handlers::submit))
        .route("/v1/forms/{id}/status", get(handlers::status))
        .route("/v1/forms/{id}/summary", get(handlers::summary))
        .route("/v1/forms/{id}/responses", get(handlers::responses))
        .route("/v1/forms/{id}/audit", get(handlers::form_audit))
        .route("/v1/question-types", get(handlers::question_types))
        .route("/v1/hotline", get(handlers::hotline))
        .route("/v1/audit", get(handlers::audit_stats))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

/// Serve on `config.listen_addr` backed by an in-memory store
pub async fn run(config: EngineConfig) -> anyhow::Result<()> {
    let addr = config.listen_addr.clone();
    let service = FormService::new(Arc::new(InMemoryFormStore::new()), config);
    let state = AppState::new(service).map_err(|e| anyhow::anyhow!("metrics registry: {}", e))?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Forms API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
