//! Curriculum management handlers (create, list, get, delete).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use malla_core::CurriculumId;

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParams};
use crate::schema::curricula::{CreateCurriculumRequest, CurriculumListResponse, CurriculumView};
use crate::state::AppState;

/// `GET /curricula`
pub async fn list_curricula(
    State(state): State<AppState>,
) -> Result<Json<CurriculumListResponse>, ApiError> {
    let service = state.service.lock().await;
    let curricula = service.list_curricula()?;
    Ok(Json(CurriculumListResponse { curricula }))
}

/// `POST /curricula`
pub async fn create_curriculum(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateCurriculumRequest>,
) -> Result<(StatusCode, Json<CurriculumView>), ApiError> {
    let mut service = state.service.lock().await;
    let view = service.create_curriculum(req)?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /curricula/{id}`
pub async fn get_curriculum(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<CurriculumView>, ApiError> {
    let service = state.service.lock().await;
    let view = service.get_curriculum(&CurriculumId(id))?;
    Ok(Json(view))
}

/// `DELETE /curricula/{id}`
pub async fn delete_curriculum(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut service = state.service.lock().await;
    service.delete_curriculum(&CurriculumId(id))?;
    Ok(Json(serde_json::json!({ "success": true })))
}
