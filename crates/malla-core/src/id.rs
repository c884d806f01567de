//! Stable ID newtypes for catalog and curriculum entities.
//!
//! All IDs are distinct newtype wrappers, providing type safety so that a
//! `CourseId` cannot be accidentally used where a `CurriculumId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A level (semester) number. Valid levels start at 1.
pub type Level = u32;

/// Stable course identifier from the catalog (e.g. `"PROG101"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub String);

/// Curriculum identity (e.g. `"MALLA001"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurriculumId(pub String);

/// Placement identity, unique within its curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub u32);

impl CourseId {
    pub fn new(id: impl Into<String>) -> Self {
        CourseId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CurriculumId {
    pub fn new(id: impl Into<String>) -> Self {
        CurriculumId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Display implementations -- just print the inner value.

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CurriculumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        CourseId(s.to_string())
    }
}

impl From<&str> for CurriculumId {
    fn from(s: &str) -> Self {
        CurriculumId(s.to_string())
    }
}
