//! Placement handlers: insert with prerequisites, move/reposition, remove.

use axum::extract::State;
use axum::Json;

use malla_core::{CurriculumId, PlacementId};

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParams};
use crate::schema::placements::{
    InsertWithPrerequisitesRequest, InsertWithPrerequisitesResponse, RemovePlacementResponse,
    UpdatePlacementRequest, UpdatePlacementResponse,
};
use crate::state::AppState;

/// Places a course and every missing prerequisite.
///
/// `POST /curricula/{id}/placements/with-prerequisites`
pub async fn insert_with_prerequisites(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
    JsonBody(req): JsonBody<InsertWithPrerequisitesRequest>,
) -> Result<Json<InsertWithPrerequisitesResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let response = service.insert_with_prerequisites(&CurriculumId(id), req)?;
    Ok(Json(response))
}

/// Moves a placement to another level and/or repositions it.
///
/// `PUT /curricula/{id}/placements/{placement_id}`
pub async fn update_placement(
    State(state): State<AppState>,
    PathParams((id, placement_id)): PathParams<(String, u32)>,
    JsonBody(req): JsonBody<UpdatePlacementRequest>,
) -> Result<Json<UpdatePlacementResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let response =
        service.update_placement(&CurriculumId(id), PlacementId(placement_id), req)?;
    Ok(Json(response))
}

/// `DELETE /curricula/{id}/placements/{placement_id}`
pub async fn remove_placement(
    State(state): State<AppState>,
    PathParams((id, placement_id)): PathParams<(String, u32)>,
) -> Result<Json<RemovePlacementResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let response = service.remove_placement(&CurriculumId(id), PlacementId(placement_id))?;
    Ok(Json(response))
}
