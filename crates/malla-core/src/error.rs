//! Core error types for malla-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering every
//! way a placement operation can be rejected. A rejected operation never
//! leaves a partially mutated curriculum behind.

use crate::id::{CourseId, Level, PlacementId};
use thiserror::Error;

/// Core errors produced by the catalog and the placement engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The course already has a placement in the curriculum.
    #[error("course '{code}' ({name}) is already placed at level {level}")]
    DuplicateCourse {
        course_id: CourseId,
        name: String,
        code: String,
        level: Level,
        placement_id: PlacementId,
    },

    /// The prerequisite depth does not fit within the curriculum's levels.
    #[error(
        "course '{course_id}' needs at least level {min_level} but the curriculum only has {level_count} level(s)"
    )]
    LevelCapacity {
        course_id: CourseId,
        requested_level: Level,
        min_level: Level,
        level_count: Level,
    },

    /// A move would put a course at or before one of its placed prerequisites.
    #[error(
        "course '{course_id}' must be placed after level {max_prerequisite_level} (prerequisite '{blocking_prerequisite}')"
    )]
    PrerequisiteOrder {
        course_id: CourseId,
        requested_level: Level,
        max_prerequisite_level: Level,
        blocking_prerequisite: CourseId,
    },

    /// A course ID was not found in the catalog.
    #[error("course not found: '{id}'")]
    UnknownCourse { id: CourseId },

    /// A placement ID was not found in the curriculum.
    #[error("placement not found: {id}")]
    PlacementNotFound { id: PlacementId },

    /// A target level outside `[1, level_count]` was given to a move.
    #[error("level {level} is outside 1..={level_count}")]
    LevelOutOfRange { level: Level, level_count: Level },

    /// A catalog course lists itself as a prerequisite.
    #[error("course '{id}' lists itself as a prerequisite")]
    SelfPrerequisite { id: CourseId },

    /// Two catalog entries share the same course ID.
    #[error("duplicate course id in catalog: '{id}'")]
    DuplicateCatalogEntry { id: CourseId },
}
