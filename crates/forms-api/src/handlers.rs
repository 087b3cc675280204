//! API Handlers
use crate::error::ApiError;
use crate::middleware::Submitter;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use forms_core::{FormDefinition, FormsError, QuestionType, RawAnswers};
use forms_registry::descriptors;
use serde::Deserialize;
use serde_json::{json, Value};

type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// REQUEST BODIES
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestion {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChangeType {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

#[derive(Debug, Deserialize)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Deserialize)]
pub struct SubmitBody {
    pub answers: RawAnswers,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
    /// Single response by position, for one-at-a-time paging
    pub index: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CursorQuery {
    pub cursor: Option<String>,
}

// ============================================================================
// FORMS
// ============================================================================

pub async fn create_form(
    State(state): State<AppState>,
    Json(body): Json<CreateForm>,
) -> ApiResult<(StatusCode, Json<FormDefinition>)> {
    let form = state.service.create_form(&body.title).await?;
    Ok((StatusCode::CREATED, Json(form)))
}

pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FormDefinition>> {
    Ok(Json(state.service.load_form(&id).await?))
}

pub async fn save_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut form): Json<FormDefinition>,
) -> ApiResult<Json<FormDefinition>> {
    form.id = id;
    Ok(Json(state.service.save_form(form).await?))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.service.delete_form(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FormDefinition>> {
    Ok(Json(state.service.set_published(&id, true).await?))
}

pub async fn unpublish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FormDefinition>> {
    Ok(Json(state.service.set_published(&id, false).await?))
}

pub async fn hotline(
    State(state): State<AppState>,
    Query(query): Query<CursorQuery>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.service.hotline_forms(query.cursor.as_deref()).await?))
}

pub async fn question_types() -> Json<Value> {
    Json(json!({ "types": descriptors() }))
}

// ============================================================================
// QUESTIONS
// ============================================================================

pub async fn add_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AddQuestion>,
) -> ApiResult<(StatusCode, Json<FormDefinition>)> {
    let form = state
        .service
        .add_question(&id, body.question_type, body.title, body.required)
        .await?;
    Ok((StatusCode::CREATED, Json(form)))
}

pub async fn remove_question(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(String, String)>,
) -> ApiResult<Json<FormDefinition>> {
    Ok(Json(state.service.remove_question(&id, &question_id).await?))
}

pub async fn change_question_type(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(String, String)>,
    Json(body): Json<ChangeType>,
) -> ApiResult<Json<FormDefinition>> {
    Ok(Json(
        state
            .service
            .change_question_type(&id, &question_id, body.question_type)
            .await?,
    ))
}

pub async fn reorder_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Reorder>,
) -> ApiResult<Json<FormDefinition>> {
    Ok(Json(
        state
            .service
            .reorder_questions(&id, body.from, body.to)
            .await?,
    ))
}

// ============================================================================
// SUBMISSIONS
// ============================================================================

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Submitter(identity): Submitter,
    Json(body): Json<SubmitBody>,
) -> ApiResult<impl IntoResponse> {
    match state
        .service
        .validate_and_submit(&id, &identity, body.answers)
        .await
    {
        Ok(receipt) => {
            state.metrics.record_accepted(receipt.anomalies.len());
            Ok((StatusCode::CREATED, Json(receipt)))
        }
        Err(error) => {
            if !matches!(error, FormsError::NotFound(_)) {
                state.metrics.record_rejected(error.code());
            }
            Err(error.into())
        }
    }
}

pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Submitter(identity): Submitter,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.service.submission_status(&id, &identity).await?))
}

// ============================================================================
// RESPONSES
// ============================================================================

pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let questions = state.service.build_summary(&id).await?;
    let total = state.service.count_submissions(&id).await?;
    Ok(Json(json!({ "formId": id, "totalSubmissions": total, "questions": questions })))
}

pub async fn responses(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<axum::response::Response> {
    if let Some(index) = query.index {
        let position = state.service.response_at(&id, index).await?;
        return Ok(Json(position).into_response());
    }
    let page = state
        .service
        .submission_views(&id, query.limit, query.offset)
        .await?;
    Ok(Json(page).into_response())
}

pub async fn question_responses(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(
        state.service.question_responses(&id, &question_id).await?,
    ))
}

// ============================================================================
// OPERATIONS
// ============================================================================

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") })),
    )
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        ),
        Err(e) => {
            tracing::error!(error = %e, "metrics encoding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
                String::new(),
            )
        }
    }
}

pub async fn audit_stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "gate": state.service.audit_stats() }))
}

pub async fn form_audit(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "formId": id, "entries": state.service.audit_entries(&id) }))
}
