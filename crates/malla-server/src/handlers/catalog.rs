//! Read-only catalog handlers.

use axum::extract::State;
use axum::Json;

use malla_core::CourseId;

use crate::error::ApiError;
use crate::extract::PathParams;
use crate::schema::catalog::{CourseDetailResponse, CourseListResponse};
use crate::state::AppState;

/// Lists the catalog in catalog order.
///
/// `GET /courses`
pub async fn list_courses(State(state): State<AppState>) -> Json<CourseListResponse> {
    let service = state.service.lock().await;
    Json(service.list_courses())
}

/// One course with its resolved prerequisites and dependents.
///
/// `GET /courses/{course_id}`
pub async fn get_course(
    State(state): State<AppState>,
    PathParams(course_id): PathParams<String>,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let service = state.service.lock().await;
    let detail = service.get_course(&CourseId(course_id))?;
    Ok(Json(detail))
}
