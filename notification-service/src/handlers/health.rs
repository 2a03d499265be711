use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness check. Never touches the mail transport.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "message": "Email server is running"
    }))
}
