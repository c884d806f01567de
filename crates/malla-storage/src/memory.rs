//! In-memory implementation of [`CurriculumStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral
//! servers. It keeps whole values in insertion-ordered maps, with the same
//! semantics as the SQLite backend.

use indexmap::IndexMap;

use malla_core::{Course, CourseId, Curriculum, CurriculumId};

use crate::error::StorageError;
use crate::traits::CurriculumStore;
use crate::types::CurriculumSummary;

/// In-memory storage backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    courses: IndexMap<CourseId, Course>,
    curricula: IndexMap<CurriculumId, Curriculum>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CurriculumStore for InMemoryStore {
    fn upsert_course(&mut self, course: &Course) -> Result<(), StorageError> {
        self.courses.insert(course.id.clone(), course.clone());
        Ok(())
    }

    fn get_course(&self, id: &CourseId) -> Result<Course, StorageError> {
        self.courses
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::CourseNotFound(id.clone()))
    }

    fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        Ok(self.courses.values().cloned().collect())
    }

    fn create_curriculum(&mut self, curriculum: &Curriculum) -> Result<(), StorageError> {
        if self.curricula.contains_key(&curriculum.id) {
            return Err(StorageError::AlreadyExists(curriculum.id.clone()));
        }
        self.curricula
            .insert(curriculum.id.clone(), curriculum.clone());
        Ok(())
    }

    fn load_curriculum(&self, id: &CurriculumId) -> Result<Curriculum, StorageError> {
        self.curricula
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::CurriculumNotFound(id.clone()))
    }

    fn save_curriculum(&mut self, curriculum: &Curriculum) -> Result<(), StorageError> {
        let slot = self
            .curricula
            .get_mut(&curriculum.id)
            .ok_or_else(|| StorageError::CurriculumNotFound(curriculum.id.clone()))?;
        *slot = curriculum.clone();
        Ok(())
    }

    fn delete_curriculum(&mut self, id: &CurriculumId) -> Result<(), StorageError> {
        self.curricula
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::CurriculumNotFound(id.clone()))
    }

    fn list_curricula(&self) -> Result<Vec<CurriculumSummary>, StorageError> {
        Ok(self.curricula.values().map(CurriculumSummary::from).collect())
    }
}
