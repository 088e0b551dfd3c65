use crate::constants::VERSION;
use axum::{http::StatusCode, response::IntoResponse, Json};

/// Liveness check: the process is running.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok", "version": VERSION })),
    )
}
