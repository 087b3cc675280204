//! Integration tests for the HTTP surface, driven through the router.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use forms_api::{create_app, service::FormService, AppState};
use forms_core::{EngineConfig, InMemoryFormStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let service = FormService::new(Arc::new(InMemoryFormStore::new()), EngineConfig::default());
    create_app(AppState::new(service).unwrap())
}

async fn send(app: &Router, method: &str, uri: &str, submitter: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(id) = submitter {
        request = request.header("x-submitter-id", id);
    }
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Published form with a required name and an optional rating
async fn published_form(app: &Router) -> (String, String, String) {
    let (status, form) = send(app, "POST", "/v1/forms", None, Some(json!({ "title": "Bazaar Feedback" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = form["id"].as_str().unwrap().to_string();

    send(
        app,
        "POST",
        &format!("/v1/forms/{}/questions", id),
        None,
        Some(json!({ "type": "SHORT_ANSWER", "title": "Name", "required": true })),
    )
    .await;
    let (status, form) = send(
        app,
        "POST",
        &format!("/v1/forms/{}/questions", id),
        None,
        Some(json!({ "type": "RATING", "title": "Stall quality" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let name_id = form["questions"][0]["id"].as_str().unwrap().to_string();
    let rating_id = form["questions"][1]["id"].as_str().unwrap().to_string();

    let (status, form) = send(app, "POST", &format!("/v1/forms/{}/publish", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["isPublished"], true);

    (id, name_id, rating_id)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_submit_then_duplicate() {
    let app = app();
    let (id, name_id, rating_id) = published_form(&app).await;
    let uri = format!("/v1/forms/{}/submissions", id);
    let body = json!({ "answers": { name_id.clone(): "Sari", rating_id.clone(): 4 } });

    let (status, receipt) = send(&app, "POST", &uri, Some("u1"), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["submission"]["answers"].as_array().unwrap().len(), 2);
    assert_eq!(receipt["anomalies"], json!([]));

    let (status, error) = send(&app, "POST", &uri, Some("u1"), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "ALREADY_SUBMITTED");

    let (_, status_body) = send(&app, "GET", &format!("/v1/forms/{}/status", id), Some("u1"), None).await;
    assert_eq!(status_body["hasSubmitted"], true);
    assert_eq!(status_body["canSubmit"], false);

    let (_, summary) = send(&app, "GET", &format!("/v1/forms/{}/summary", id), None, None).await;
    assert_eq!(summary["totalSubmissions"], 1);
    assert_eq!(summary["questions"][1]["body"]["data"]["4"], 1);
}

#[tokio::test]
async fn test_anonymous_rejected_when_auth_required() {
    let app = app();
    let (id, name_id, _) = published_form(&app).await;
    let (status, error) = send(
        &app,
        "POST",
        &format!("/v1/forms/{}/submissions", id),
        None,
        Some(json!({ "answers": { name_id: "Sari" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_missing_required_field() {
    let app = app();
    let (id, name_id, _) = published_form(&app).await;
    let (status, error) = send(
        &app,
        "POST",
        &format!("/v1/forms/{}/submissions", id),
        Some("u2"),
        Some(json!({ "answers": { name_id.clone(): "  " } })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"], "VALIDATION_ERROR");
    assert_eq!(error["fields"][0]["questionId"], name_id.as_str());

    let (_, page) = send(&app, "GET", &format!("/v1/forms/{}/responses", id), None, None).await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_responses_views() {
    let app = app();
    let (id, name_id, rating_id) = published_form(&app).await;
    send(
        &app,
        "POST",
        &format!("/v1/forms/{}/submissions", id),
        Some("u3"),
        Some(json!({ "answers": { name_id: "Tono" } })),
    )
    .await;

    let (status, position) = send(&app, "GET", &format!("/v1/forms/{}/responses?index=0", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(position["total"], 1);
    assert_eq!(position["response"]["answers"][1]["display"], "Skipped");

    let (status, _) = send(&app, "GET", &format!("/v1/forms/{}/responses?index=3", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, responses) = send(
        &app,
        "GET",
        &format!("/v1/forms/{}/questions/{}/responses", id, rating_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(responses["responses"], json!([]));
}

#[tokio::test]
async fn test_invalid_publish_and_unknown_form() {
    let app = app();
    let (_, form) = send(&app, "POST", "/v1/forms", None, Some(json!({ "title": "Poll" }))).await;
    let id = form["id"].as_str().unwrap().to_string();
    send(
        &app,
        "POST",
        &format!("/v1/forms/{}/questions", id),
        None,
        Some(json!({ "type": "MULTIPLE_CHOICE", "title": "Pick one" })),
    )
    .await;

    let (status, error) = send(&app, "POST", &format!("/v1/forms/{}/publish", id), None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"], "INVALID_DEFINITION");
    assert_eq!(error["violations"][0]["kind"], "MISSING_CHOICE_OPTION");

    let (status, error) = send(&app, "GET", "/v1/forms/does-not-exist", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_reorder_and_delete() {
    let app = app();
    let (id, name_id, _) = published_form(&app).await;

    let (status, form) = send(&app, "POST", &format!("/v1/forms/{}/reorder", id), None, Some(json!({ "from": 0, "to": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["questions"][1]["id"], name_id.as_str());
    assert_eq!(form["questions"][1]["order"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/v1/forms/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/v1/forms/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hotline_listing() {
    let app = app();
    let (id, _, _) = published_form(&app).await;
    let (_, mut form) = send(&app, "GET", &format!("/v1/forms/{}", id), None, None).await;
    form["kind"] = json!("HOTLINE");
    let (status, _) = send(&app, "PUT", &format!("/v1/forms/{}", id), None, Some(form)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, page) = send(&app, "GET", "/v1/hotline", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["forms"][0]["id"], id.as_str());
    assert_eq!(page["nextCursor"], Value::Null);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = app();
    let (id, name_id, _) = published_form(&app).await;
    send(
        &app,
        "POST",
        &format!("/v1/forms/{}/submissions", id),
        Some("u7"),
        Some(json!({ "answers": { name_id: "Ani" } })),
    )
    .await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("forms_submissions_accepted_total 1"));
}
