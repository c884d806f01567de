//! Course catalog, curriculum model and the prerequisite-aware placement engine.
//!
//! The crate is pure and synchronous: no I/O, no logging, no global state.
//! A [`Catalog`] is built once and borrowed; a [`Curriculum`] is owned by the
//! caller and passed explicitly into every [`PlacementEngine`] operation.

pub mod analysis;
pub mod catalog;
pub mod coherence;
pub mod course;
pub mod curriculum;
pub mod error;
pub mod id;
pub mod placement;

// Re-export commonly used types
pub use analysis::{
    AcademicLoad, PlanValidation, PrerequisiteAnalysis, PrerequisiteStatus, Recommendation,
    RecommendationKind, Statistics, Violation, ViolationKind,
};
pub use catalog::{Catalog, Requires};
pub use coherence::{Coherence, CoherenceStatus};
pub use course::{Course, Difficulty, DEFAULT_COURSE_HOURS};
pub use curriculum::{Curriculum, Placement, Position};
pub use error::CoreError;
pub use id::{CourseId, CurriculumId, Level, PlacementId};
pub use placement::{Closure, ClosureMember, InsertOutcome, LevelInfo, PlacementEngine};
