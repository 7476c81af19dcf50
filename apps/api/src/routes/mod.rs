pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

/// Upload cap for the multipart start request. Well above any realistic
/// resume/JD pair.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route(
            "/api/v1/interview/start",
            post(handlers::handle_start_interview),
        )
        .route("/api/v1/interview/chat", post(handlers::handle_chat))
        .route(
            "/api/v1/interview/feedback",
            post(handlers::handle_feedback),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
