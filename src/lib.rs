pub mod config;
pub mod error;
pub mod handlers;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::storage::StorageService;
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Headroom on top of the size cap for multipart framing, so the handler's
/// own size check is the one that answers within that envelope.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::upload::show_upload_form,
        handlers::upload::upload_file,
        handlers::health::health_check,
    ),
    components(schemas(handlers::health::HealthResponse)),
    tags(
        (name = "upload", description = "File upload endpoint"),
        (name = "system", description = "Service status endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.max_file_size + MULTIPART_OVERHEAD;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/upload",
            get(handlers::upload::show_upload_form).post(handlers::upload::upload_file),
        )
        .route("/health", get(handlers::health::health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
