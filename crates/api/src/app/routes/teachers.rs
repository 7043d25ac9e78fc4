use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use faculty_core::TeacherId;
use faculty_teachers::{DocumentNumber, Teacher};

use crate::app::dto::{self, ValidTeacher};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_teachers).post(create_teacher))
        .route(
            "/:id",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        .route("/searchByName/:name", get(search_by_name))
        .route("/searchByDocument/:number_document", get(search_by_document))
}

pub async fn list_teachers(Extension(services): Extension<AppServices>) -> axum::response::Response {
    dto::stream_to_response(services.teachers().find_all()).await
}

pub async fn get_teacher(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TeacherId>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    dto::found_or_not_found(services.teachers().find_by_id(&id).await)
}

pub async fn create_teacher(
    Extension(services): Extension<AppServices>,
    ValidTeacher(teacher): ValidTeacher,
) -> axum::response::Response {
    // Identity is always storage-assigned on create.
    let created = match services.teachers().create(teacher.without_id()).await {
        Ok(t) => t,
        Err(e) => return errors::store_error_to_response(e),
    };

    let Some(id) = created.id.as_ref() else {
        return errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            "store did not assign an id",
        );
    };
    let location = format!("/teachers/{id}");

    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response()
}

pub async fn update_teacher(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    ValidTeacher(teacher): ValidTeacher,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TeacherId>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    dto::found_or_not_found(services.teachers().update(&id, teacher).await)
}

pub async fn delete_teacher(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TeacherId>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match services.teachers().delete_by_id(&id).await {
        Ok(Some(_)) => StatusCode::OK.into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn search_by_name(
    Extension(services): Extension<AppServices>,
    Path(name): Path<String>,
) -> axum::response::Response {
    dto::stream_to_response(services.teachers().find_by_name(&name)).await
}

pub async fn search_by_document(
    Extension(services): Extension<AppServices>,
    Path(number_document): Path<i32>,
) -> axum::response::Response {
    // No stored teacher can carry a non-positive number.
    match DocumentNumber::new(number_document) {
        Ok(number) => dto::stream_to_response(services.teachers().find_by_number_document(number)).await,
        Err(_) => (StatusCode::OK, Json(Vec::<Teacher>::new())).into_response(),
    }
}
