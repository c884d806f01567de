//! Placement operation request/response types.

use serde::{Deserialize, Serialize};

use malla_core::{CourseId, Level, LevelInfo, Position};

use super::curricula::PlacementView;

/// Request body for `POST /curricula/{id}/placements/with-prerequisites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertWithPrerequisitesRequest {
    pub course_id: CourseId,
    /// Requested level; may be adjusted.
    pub level: Level,
    /// Drop point. Auto-inserted prerequisites are laid out relative to it.
    #[serde(default)]
    pub position: Option<Position>,
    /// When true, the outcome is computed and returned but not saved.
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertWithPrerequisitesResponse {
    pub success: bool,
    /// Confirmation text summarizing the placement.
    pub message: String,
    pub primary_placement: PlacementView,
    pub auto_added_prerequisites: Vec<PlacementView>,
    pub level_info: LevelInfo,
    pub committed: bool,
}

/// Request body for `PUT /curricula/{id}/placements/{placement_id}`.
///
/// `level` moves the placement (validated); `position` only relocates it on
/// the canvas. At least one must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlacementRequest {
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePlacementResponse {
    pub success: bool,
    pub placement: PlacementView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovePlacementResponse {
    pub success: bool,
    pub message: String,
    pub removed: PlacementView,
}
