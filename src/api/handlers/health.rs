/*
 * Responsibility
 * - GET /api/health and GET / (liveness, no auth)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn welcome() -> &'static str {
    "Welcome to the Recipe Sharing Platform!"
}
