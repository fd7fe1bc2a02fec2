use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness message matching what the frontend polls for.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "AI Service is running..."
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ai-service"
    }))
}
