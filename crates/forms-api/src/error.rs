//! HTTP mapping of engine errors
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use forms_core::{FormsError, GateError};
use serde_json::{json, Value};

/// Wraps `FormsError` so handlers can use `?`
#[derive(Debug)]
pub struct ApiError(pub FormsError);

impl From<FormsError> for ApiError {
    fn from(error: FormsError) -> Self {
        ApiError(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            FormsError::Validation(_) | FormsError::Definition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FormsError::Gate(GateError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            FormsError::Gate(GateError::AlreadySubmitted) => StatusCode::CONFLICT,
            FormsError::Gate(GateError::FormClosed) => StatusCode::FORBIDDEN,
            FormsError::NotFound(_) => StatusCode::NOT_FOUND,
            FormsError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        let code = self.0.code();
        match &self.0 {
            FormsError::Validation(fields) => json!({
                "error": code,
                "message": "Some required questions are unanswered.",
                "fields": fields,
            }),
            FormsError::Gate(gate) => json!({ "error": code, "message": gate.to_string() }),
            FormsError::NotFound(what) => json!({ "error": code, "message": format!("{} not found", what) }),
            FormsError::Definition(violations) => json!({
                "error": code,
                "message": violations.to_string(),
                "violations": violations,
            }),
            FormsError::Store(_) => json!({ "error": code, "message": "The operation failed." }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}
