use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::source::SourceRepository;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(source_repo): State<Arc<dyn SourceRepository>>) -> impl IntoResponse {
    let sources = source_repo.get_all_sources().len();
    if sources > 0 {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "sources": sources
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "sources": 0
            })),
        )
    }
}
