//! Curriculum management request/response types.

use serde::{Deserialize, Serialize};

use malla_core::{Catalog, CourseId, Curriculum, CurriculumId, Level, Placement, PlacementId, Position};
use malla_storage::CurriculumSummary;

/// Request body for `POST /curricula`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCurriculumRequest {
    /// Generated when omitted.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub program: String,
    pub target_credits: u32,
    pub level_count: Level,
}

/// Response for `GET /curricula`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumListResponse {
    pub curricula: Vec<CurriculumSummary>,
}

/// A placement joined with its catalog course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementView {
    pub id: PlacementId,
    pub course_id: CourseId,
    pub level: Level,
    pub position: Position,
    /// `None` when the course is no longer in the catalog.
    pub name: Option<String>,
    pub code: Option<String>,
    pub credits: u32,
}

impl PlacementView {
    pub fn new(placement: &Placement, catalog: &Catalog) -> Self {
        let course = catalog.get(&placement.course_id);
        PlacementView {
            id: placement.id,
            course_id: placement.course_id.clone(),
            level: placement.level,
            position: placement.position,
            name: course.map(|c| c.name.clone()),
            code: course.map(|c| c.code.clone()),
            credits: course.map_or(0, |c| c.credits),
        }
    }
}

/// Response for `GET /curricula/{id}` and `POST /curricula`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumView {
    pub id: CurriculumId,
    pub name: String,
    pub program: String,
    pub target_credits: u32,
    pub level_count: Level,
    pub total_credits: u32,
    pub placements: Vec<PlacementView>,
}

impl CurriculumView {
    pub fn new(curriculum: &Curriculum, catalog: &Catalog) -> Self {
        CurriculumView {
            id: curriculum.id.clone(),
            name: curriculum.name.clone(),
            program: curriculum.program.clone(),
            target_credits: curriculum.target_credits,
            level_count: curriculum.level_count,
            total_credits: curriculum.total_credits(catalog),
            placements: curriculum
                .placements()
                .iter()
                .map(|p| PlacementView::new(p, catalog))
                .collect(),
        }
    }
}
