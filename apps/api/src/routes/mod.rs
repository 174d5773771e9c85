pub mod health;
pub mod resumes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/upload",
            post(resumes::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/extract", post(resumes::handle_extract))
        .with_state(state)
}
