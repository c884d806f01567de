//! Catalog course definitions.
//!
//! A [`Course`] is read-only from the placement engine's perspective. Its
//! `prerequisites` list is kept exactly as authored (ordered, possibly naming
//! courses that are not in the catalog); the resolved prerequisite edges live
//! in [`Catalog`](crate::catalog::Catalog).

use serde::{Deserialize, Serialize};

use crate::id::CourseId;

/// Contact hours assumed for a course that does not declare any.
pub const DEFAULT_COURSE_HOURS: u32 = 48;

/// Informational difficulty rating. Not used by placement logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Intermediate,
    Hard,
}

impl Difficulty {
    /// Stable lowercase name, used for storage and statistics keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Hard => "hard",
        }
    }

    /// Parses a stored difficulty name. Unknown names fall back to `Easy`.
    pub fn from_name(s: &str) -> Self {
        match s {
            "intermediate" => Difficulty::Intermediate,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique, stable identifier.
    pub id: CourseId,
    /// Display name.
    pub name: String,
    /// Display code.
    pub code: String,
    /// Credit value counted toward the program target.
    pub credits: u32,
    /// Contact hours. `None` means [`DEFAULT_COURSE_HOURS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    /// Ordered prerequisite course IDs.
    #[serde(default)]
    pub prerequisites: Vec<CourseId>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Course {
    /// Creates a course with no prerequisites, default hours and `Easy` difficulty.
    pub fn new(id: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        let id = id.into();
        Course {
            code: id.clone(),
            id: CourseId(id),
            name: name.into(),
            credits,
            hours: None,
            prerequisites: Vec::new(),
            difficulty: Difficulty::Easy,
            description: None,
        }
    }

    /// Builder-style setter for the prerequisite list.
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites
            .into_iter()
            .map(|p| CourseId(p.into()))
            .collect();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Contact hours, falling back to [`DEFAULT_COURSE_HOURS`].
    pub fn effective_hours(&self) -> u32 {
        self.hours.unwrap_or(DEFAULT_COURSE_HOURS)
    }
}
