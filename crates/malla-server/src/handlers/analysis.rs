//! Read-only curriculum analysis handlers.

use axum::extract::State;
use axum::Json;

use malla_core::{
    Coherence, CourseId, CurriculumId, PlanValidation, PrerequisiteAnalysis, Statistics,
};

use crate::error::ApiError;
use crate::extract::PathParams;
use crate::state::AppState;

/// `GET /curricula/{id}/coherence`
pub async fn coherence(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<Coherence>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.coherence(&CurriculumId(id))?))
}

/// `GET /curricula/{id}/statistics`
pub async fn statistics(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<Statistics>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.statistics(&CurriculumId(id))?))
}

/// `GET /curricula/{id}/validation`
pub async fn validation(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<PlanValidation>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.validation(&CurriculumId(id))?))
}

/// Direct prerequisites of one course checked against the curriculum.
///
/// `GET /curricula/{id}/courses/{course_id}/prerequisites`
pub async fn prerequisites(
    State(state): State<AppState>,
    PathParams((id, course_id)): PathParams<(String, String)>,
) -> Result<Json<PrerequisiteAnalysis>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(
        service.prerequisite_analysis(&CurriculumId(id), &CourseId(course_id))?,
    ))
}
