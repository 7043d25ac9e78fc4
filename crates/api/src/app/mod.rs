//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the teacher service handle
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request extraction and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use faculty_infra::{StoreConfig, TeacherStoreError};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router around already-wired services.
pub fn build_app(services: AppServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}

/// Wire services for `config` and build the router (public entrypoint used by `main.rs`).
pub async fn build_app_from_config(config: &StoreConfig) -> Result<Router, TeacherStoreError> {
    let services = services::build_services(config).await?;
    Ok(build_app(services))
}
