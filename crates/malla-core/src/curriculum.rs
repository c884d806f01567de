//! The curriculum under edit and its placements.
//!
//! [`Curriculum`] owns all of its [`Placement`]s. Placements are kept in
//! insertion order; the one-placement-per-course invariant is enforced by the
//! placement engine, which is the only code that creates placements.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::id::{CourseId, CurriculumId, Level, PlacementId};

/// Opaque display coordinates. Never interpreted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

/// One course instance at one level of a curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: PlacementId,
    pub course_id: CourseId,
    pub level: Level,
    #[serde(default)]
    pub position: Position,
}

/// A curriculum ("malla") being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    pub id: CurriculumId,
    pub name: String,
    /// Program label (e.g. "Ingeniería de Sistemas").
    pub program: String,
    /// Program-wide credit goal.
    pub target_credits: u32,
    /// Number of available levels; valid levels are `1..=level_count`.
    pub level_count: Level,
    placements: Vec<Placement>,
    /// Next placement ID counter.
    next_placement_id: u32,
}

impl Curriculum {
    /// Creates an empty curriculum.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        program: impl Into<String>,
        target_credits: u32,
        level_count: Level,
    ) -> Self {
        Curriculum {
            id: CurriculumId(id.into()),
            name: name.into(),
            program: program.into(),
            target_credits,
            level_count,
            placements: Vec::new(),
            next_placement_id: 1,
        }
    }

    /// Reconstructs a curriculum from stored parts.
    ///
    /// Used by the storage layer; the placements are trusted to already
    /// satisfy the one-placement-per-course invariant.
    pub fn from_parts(
        id: CurriculumId,
        name: String,
        program: String,
        target_credits: u32,
        level_count: Level,
        placements: Vec<Placement>,
        next_placement_id: u32,
    ) -> Self {
        Curriculum {
            id,
            name,
            program,
            target_credits,
            level_count,
            placements,
            next_placement_id,
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns the next placement ID counter value.
    pub fn next_placement_id(&self) -> u32 {
        self.next_placement_id
    }

    pub fn placement(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// The placement holding `course_id`, if the course is placed.
    pub fn placement_for_course(&self, course_id: &CourseId) -> Option<&Placement> {
        self.placements.iter().find(|p| &p.course_id == course_id)
    }

    /// The level at which `course_id` is placed, if it is.
    pub fn level_of(&self, course_id: &CourseId) -> Option<Level> {
        self.placement_for_course(course_id).map(|p| p.level)
    }

    /// Placements at `level`, in insertion order.
    pub fn placements_at(&self, level: Level) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.level == level)
    }

    /// Sum of catalog credits over all placements. Placements whose course
    /// has left the catalog count as zero.
    pub fn total_credits(&self, catalog: &Catalog) -> u32 {
        self.placements
            .iter()
            .filter_map(|p| catalog.get(&p.course_id))
            .map(|c| c.credits)
            .sum()
    }

    // -----------------------------------------------------------------------
    // Crate-internal mutation (only the placement engine calls these)
    // -----------------------------------------------------------------------

    pub(crate) fn push_placement(
        &mut self,
        course_id: CourseId,
        level: Level,
        position: Position,
    ) -> Placement {
        let placement = Placement {
            id: PlacementId(self.next_placement_id),
            course_id,
            level,
            position,
        };
        self.next_placement_id += 1;
        self.placements.push(placement.clone());
        placement
    }

    pub(crate) fn placement_mut(&mut self, id: PlacementId) -> Option<&mut Placement> {
        self.placements.iter_mut().find(|p| p.id == id)
    }

    pub(crate) fn take_placement(&mut self, id: PlacementId) -> Option<Placement> {
        let pos = self.placements.iter().position(|p| p.id == id)?;
        Some(self.placements.remove(pos))
    }
}
