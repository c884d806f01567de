//! Storage-layer listing types.

use serde::{Deserialize, Serialize};

use malla_core::{Curriculum, CurriculumId, Level};

/// Summary of a stored curriculum (for listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumSummary {
    pub id: CurriculumId,
    pub name: String,
    pub program: String,
    pub target_credits: u32,
    pub level_count: Level,
    pub placement_count: usize,
}

impl From<&Curriculum> for CurriculumSummary {
    fn from(c: &Curriculum) -> Self {
        CurriculumSummary {
            id: c.id.clone(),
            name: c.name.clone(),
            program: c.program.clone(),
            target_credits: c.target_credits,
            level_count: c.level_count,
            placement_count: c.placements().len(),
        }
    }
}
