use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use faculty_infra::TeacherStoreError;
use faculty_teachers::ValidationErrors;

pub fn store_error_to_response(err: TeacherStoreError) -> axum::response::Response {
    tracing::warn!(error = %err, "teacher store failure");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
}

pub fn validation_error_to_response(err: ValidationErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": err.to_string(),
            "violations": err.violations,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
