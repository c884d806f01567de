//! The [`CurriculumStore`] trait defining the storage contract.
//!
//! The store persists two independent things: the course catalog and the
//! curricula built against it. Curricula are saved whole; the placement
//! engine mutates an owned [`Curriculum`] and the caller writes it back with
//! [`CurriculumStore::save_curriculum`] only when the operation succeeded.
//!
//! All backends (InMemoryStore, SqliteStore) implement this trait, so they
//! are swappable without changing service logic.

use malla_core::{Catalog, Course, CourseId, Curriculum, CurriculumId};

use crate::error::StorageError;
use crate::types::CurriculumSummary;

/// The storage contract for catalogs and curricula.
///
/// The trait is synchronous; the server serializes access behind a mutex.
pub trait CurriculumStore {
    // -------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------

    /// Inserts a course, or replaces the stored course with the same ID.
    fn upsert_course(&mut self, course: &Course) -> Result<(), StorageError>;

    /// Retrieves a course by ID.
    fn get_course(&self, id: &CourseId) -> Result<Course, StorageError>;

    /// All stored courses, in insertion order.
    fn list_courses(&self) -> Result<Vec<Course>, StorageError>;

    /// Builds a [`Catalog`] from all stored courses.
    fn load_catalog(&self) -> Result<Catalog, StorageError> {
        Catalog::from_courses(self.list_courses()?).map_err(|e| {
            StorageError::ReconstructionError {
                reason: e.to_string(),
            }
        })
    }

    // -------------------------------------------------------------------
    // Curricula
    // -------------------------------------------------------------------

    /// Stores a new curriculum. Fails with [`StorageError::AlreadyExists`]
    /// when the ID is taken.
    fn create_curriculum(&mut self, curriculum: &Curriculum) -> Result<(), StorageError>;

    /// Loads a curriculum with all of its placements.
    fn load_curriculum(&self, id: &CurriculumId) -> Result<Curriculum, StorageError>;

    /// Overwrites an existing curriculum, placements included.
    fn save_curriculum(&mut self, curriculum: &Curriculum) -> Result<(), StorageError>;

    /// Deletes a curriculum and its placements.
    fn delete_curriculum(&mut self, id: &CurriculumId) -> Result<(), StorageError>;

    /// Lists all stored curricula.
    fn list_curricula(&self) -> Result<Vec<CurriculumSummary>, StorageError>;
}
