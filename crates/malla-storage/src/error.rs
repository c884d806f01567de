//! Storage error types for malla-storage.
//!
//! [`StorageError`] covers all anticipated failure modes in the storage layer:
//! SQLite and migration failures, serialization, missing entities, integrity
//! violations, and catalog reconstruction failures.

use malla_core::{CourseId, CurriculumId};
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying SQLite call failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A curriculum with the given ID was not found.
    #[error("curriculum not found: {0}")]
    CurriculumNotFound(CurriculumId),

    /// A course with the given ID was not found in the stored catalog.
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),

    /// A curriculum with the given ID already exists.
    #[error("curriculum already exists: {0}")]
    AlreadyExists(CurriculumId),

    /// A data integrity violation was detected.
    #[error("integrity error: {reason}")]
    IntegrityError { reason: String },

    /// Failed to rebuild a catalog from stored courses.
    #[error("reconstruction error: {reason}")]
    ReconstructionError { reason: String },
}
