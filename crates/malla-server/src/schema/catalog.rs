//! Catalog request/response types.

use serde::{Deserialize, Serialize};

use malla_core::{Course, CourseId};

/// Response for `GET /courses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
    pub total: usize,
}

/// Short reference to another catalog course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: CourseId,
    pub name: String,
    pub code: String,
}

impl From<&Course> for CourseRef {
    fn from(c: &Course) -> Self {
        CourseRef {
            id: c.id.clone(),
            name: c.name.clone(),
            code: c.code.clone(),
        }
    }
}

/// Response for `GET /courses/{course_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetailResponse {
    pub course: Course,
    /// Direct prerequisites that resolve to catalog courses.
    pub prerequisites: Vec<CourseRef>,
    /// Prerequisite IDs that name no catalog course.
    pub unresolved_prerequisites: Vec<CourseId>,
    /// Courses that list this one as a direct prerequisite.
    pub dependents: Vec<CourseRef>,
}
