use axum::{routing::get, Router};

pub mod system;
pub mod teachers;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        // Nesting only matches the bare prefix; accept the trailing-slash collection path too.
        .route(
            "/teachers/",
            get(teachers::list_teachers).post(teachers::create_teacher),
        )
        .nest("/teachers", teachers::router())
}
