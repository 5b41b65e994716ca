use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::db::DatabaseState;
use crate::infrastructure::repositories::AuditLogRepository;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Speech keeps working without the audit store, so readiness only reports it.
pub async fn health_ready(State(store): State<Arc<AuditLogRepository>>) -> impl IntoResponse {
    let database = if store.health_check().await {
        "connected"
    } else if store.database().state() == DatabaseState::Disabled {
        "disabled"
    } else {
        "disconnected"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "database": database,
            "tts": "available"
        })),
    )
}
