use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use futures::TryStreamExt;

use faculty_infra::{TeacherStoreError, TeacherStream};
use faculty_teachers::{Teacher, TeacherPayload};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// A validated teacher body.
///
/// Rejects malformed JSON with the framework's status and constraint
/// violations with 400, before any handler logic runs.
#[derive(Debug)]
pub struct ValidTeacher(pub Teacher);

#[axum::async_trait]
impl<S> FromRequest<S> for ValidTeacher
where
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<TeacherPayload>::from_request(req, state)
            .await
            .map_err(|rejection| {
                errors::json_error(rejection.status(), "invalid_body", rejection.body_text())
            })?;

        payload
            .validate()
            .map(ValidTeacher)
            .map_err(errors::validation_error_to_response)
    }
}

// -------------------------
// Response mapping helpers
// -------------------------

/// Drain a teacher stream into a JSON array response.
pub async fn stream_to_response(stream: TeacherStream) -> axum::response::Response {
    use axum::response::IntoResponse;

    match stream.try_collect::<Vec<Teacher>>().await {
        Ok(teachers) => (StatusCode::OK, Json(teachers)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Map an optional lookup result to 200 with the teacher or an empty 404.
pub fn found_or_not_found(result: Result<Option<Teacher>, TeacherStoreError>) -> axum::response::Response {
    use axum::response::IntoResponse;

    match result {
        Ok(Some(teacher)) => (StatusCode::OK, Json(teacher)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
