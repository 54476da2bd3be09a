pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes/parse",
            post(handlers::handle_parse_resume),
        )
        // Path used by the original web client
        .route("/api/parse-resume", post(handlers::handle_parse_resume))
        .layer(upload_limit)
        .with_state(state)
}
