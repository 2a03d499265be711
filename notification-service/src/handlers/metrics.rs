use axum::{http::header, http::StatusCode, response::IntoResponse};
use service_core::observability::render_metrics;

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_metrics(),
    )
}
