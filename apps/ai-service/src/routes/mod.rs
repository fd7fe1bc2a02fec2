pub mod handlers;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/parse-resume", post(handlers::handle_parse_resume))
        .route("/extract-skills", post(handlers::handle_extract_skills))
        .route("/analyze-resume", post(handlers::handle_analyze_resume))
        .with_state(state)
}
