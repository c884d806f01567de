//! Liveness endpoint.

use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let service = state.service.lock().await;
    Json(serde_json::json!({
        "status": "ok",
        "courses": service.catalog().len(),
    }))
}
