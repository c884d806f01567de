//! The prerequisite-aware placement engine.
//!
//! [`PlacementEngine`] borrows a [`Catalog`] and applies placement operations
//! to an explicitly passed, caller-owned [`Curriculum`]. Every operation
//! validates first and mutates last: when an operation returns `Err`, the
//! curriculum is exactly as it was before the call.
//!
//! # Layering
//!
//! Inserting a course resolves its prerequisite closure and assigns each
//! member a *layer*:
//! - an already placed prerequisite keeps its current level, and the
//!   traversal does not descend below it;
//! - an unplaced prerequisite gets `1 + max(layer of its own prerequisites)`,
//!   or 1 when it has none.
//!
//! The course itself can then sit no lower than `1 + max(layer)`.
//!
//! The traversal is an explicit-stack depth-first search. Courses currently
//! being resolved are tracked in an in-progress set; meeting one of them
//! again means the catalog has a cycle, and that edge is simply skipped.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::curriculum::{Curriculum, Placement, Position};
use crate::error::CoreError;
use crate::id::{CourseId, Level, PlacementId};

/// Horizontal offset of auto-inserted prerequisites relative to the drop point.
const AUTO_PLACEMENT_X_OFFSET: i32 = -150;
/// Vertical spacing between consecutive auto-inserted prerequisites.
const AUTO_PLACEMENT_Y_STEP: i32 = 60;

/// Level metadata reported for an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// The level the caller asked for.
    pub requested_level: Level,
    /// The level the course was actually placed at.
    pub used_level: Level,
    /// `true` when `used_level != requested_level`.
    pub adjusted: bool,
    /// Distinct layers spanned by the closure, including the course's own.
    pub tree_depth: u32,
    /// Lowest level the course could legally occupy.
    pub min_level: Level,
}

/// Result of a successful insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertOutcome {
    pub primary: Placement,
    /// Prerequisites that had to be placed, ordered by level.
    pub auto_added: Vec<Placement>,
    pub level_info: LevelInfo,
}

/// One member of a prerequisite closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureMember {
    pub layer: Level,
    /// Set when the course is already placed (its layer is then fixed).
    pub placed: Option<PlacementId>,
}

/// The resolved prerequisite closure of one course, keyed in the order the
/// members finished resolving (leaves before the courses that need them).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Closure {
    pub members: IndexMap<CourseId, ClosureMember>,
}

impl Closure {
    /// `1 + max(layer)`, or 1 for an empty closure.
    pub fn min_level(&self) -> Level {
        self.members
            .values()
            .map(|m| m.layer)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Number of distinct layers, counting `own_layer` as well.
    pub fn tree_depth(&self, own_layer: Level) -> u32 {
        let mut layers: BTreeSet<Level> = self.members.values().map(|m| m.layer).collect();
        layers.insert(own_layer);
        layers.len() as u32
    }

    /// Members that are not placed yet, ordered by layer (stable within a layer).
    pub fn unplaced(&self) -> Vec<(&CourseId, Level)> {
        let mut out: Vec<(&CourseId, Level)> = self
            .members
            .iter()
            .filter(|(_, m)| m.placed.is_none())
            .map(|(id, m)| (id, m.layer))
            .collect();
        out.sort_by_key(|(_, layer)| *layer);
        out
    }
}

enum Visit {
    Enter(CourseId),
    Exit(CourseId),
}

/// Placement operations over a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct PlacementEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        PlacementEngine { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Resolves the prerequisite closure of `course_id` against the current
    /// curriculum and computes every member's layer.
    ///
    /// Prerequisite IDs missing from the catalog are ignored. `course_id`
    /// itself is never a member, even when a cycle leads back to it.
    pub fn resolve_closure(&self, curriculum: &Curriculum, course_id: &CourseId) -> Closure {
        let mut members: IndexMap<CourseId, ClosureMember> = IndexMap::new();
        let mut in_progress: HashSet<CourseId> = HashSet::new();
        let mut stack: Vec<Visit> = Vec::new();

        in_progress.insert(course_id.clone());
        self.push_prerequisites(&mut stack, course_id);

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    if members.contains_key(&id) || in_progress.contains(&id) {
                        continue;
                    }
                    if let Some(existing) = curriculum.placement_for_course(&id) {
                        members.insert(
                            id,
                            ClosureMember {
                                layer: existing.level,
                                placed: Some(existing.id),
                            },
                        );
                        continue;
                    }
                    in_progress.insert(id.clone());
                    stack.push(Visit::Exit(id.clone()));
                    self.push_prerequisites(&mut stack, &id);
                }
                Visit::Exit(id) => {
                    in_progress.remove(&id);
                    // Prerequisites skipped as cycle edges have no entry yet.
                    let layer = self
                        .catalog
                        .prerequisites(&id)
                        .iter()
                        .filter_map(|p| members.get(&p.id))
                        .map(|m| m.layer)
                        .max()
                        .map_or(1, |max| max + 1);
                    members.insert(
                        id,
                        ClosureMember {
                            layer,
                            placed: None,
                        },
                    );
                }
            }
        }

        Closure { members }
    }

    /// Pushes prerequisites in reverse so they are visited in authored order.
    fn push_prerequisites(&self, stack: &mut Vec<Visit>, id: &CourseId) {
        for prereq in self.catalog.prerequisites(id).into_iter().rev() {
            stack.push(Visit::Enter(prereq.id.clone()));
        }
    }

    /// Computes the level metadata an insertion of `course_id` at
    /// `requested_level` would use, without touching the curriculum.
    pub fn plan_level(
        &self,
        curriculum: &Curriculum,
        course_id: &CourseId,
        requested_level: Level,
        closure: &Closure,
    ) -> Result<LevelInfo, CoreError> {
        let min_level = closure.min_level();
        let level_count = curriculum.level_count;

        let capacity_error = || CoreError::LevelCapacity {
            course_id: course_id.clone(),
            requested_level,
            min_level,
            level_count,
        };

        if min_level > level_count {
            return Err(capacity_error());
        }

        let used_level = if requested_level < min_level {
            min_level
        } else if requested_level > level_count {
            level_count
        } else {
            requested_level
        };

        Ok(LevelInfo {
            requested_level,
            used_level,
            adjusted: used_level != requested_level,
            tree_depth: closure.tree_depth(min_level),
            min_level,
        })
    }

    /// Places `course_id` at (or as close as legal to) `requested_level`,
    /// auto-inserting every missing prerequisite at its layer.
    ///
    /// Fails with [`CoreError::UnknownCourse`] for a course outside the
    /// catalog, [`CoreError::DuplicateCourse`] when it is already placed and
    /// [`CoreError::LevelCapacity`] when its prerequisite depth does not fit.
    pub fn insert_with_prerequisites(
        &self,
        curriculum: &mut Curriculum,
        course_id: &CourseId,
        requested_level: Level,
        position: Position,
    ) -> Result<InsertOutcome, CoreError> {
        let course = self.catalog.require(course_id)?;

        if let Some(existing) = curriculum.placement_for_course(course_id) {
            return Err(CoreError::DuplicateCourse {
                course_id: course_id.clone(),
                name: course.name.clone(),
                code: course.code.clone(),
                level: existing.level,
                placement_id: existing.id,
            });
        }

        let closure = self.resolve_closure(curriculum, course_id);
        let level_info = self.plan_level(curriculum, course_id, requested_level, &closure)?;

        // Validation is complete; from here on nothing can fail.
        let primary = curriculum.push_placement(course_id.clone(), level_info.used_level, position);

        let mut auto_added = Vec::new();
        for (offset, (prereq_id, layer)) in closure.unplaced().into_iter().enumerate() {
            let step = i32::try_from(offset)
                .unwrap_or(i32::MAX)
                .saturating_mul(AUTO_PLACEMENT_Y_STEP);
            let position = Position {
                x: position.x.saturating_add(AUTO_PLACEMENT_X_OFFSET),
                y: position.y.saturating_add(step),
            };
            auto_added.push(curriculum.push_placement(prereq_id.clone(), layer, position));
        }

        Ok(InsertOutcome {
            primary,
            auto_added,
            level_info,
        })
    }

    /// Moves a placement to `new_level`.
    ///
    /// The course must land strictly after every one of its *placed*
    /// prerequisites. Unplaced prerequisites and dependents impose no
    /// constraint. Only the placement's level changes.
    pub fn move_placement(
        &self,
        curriculum: &mut Curriculum,
        placement_id: PlacementId,
        new_level: Level,
    ) -> Result<Placement, CoreError> {
        let placement = curriculum
            .placement(placement_id)
            .ok_or(CoreError::PlacementNotFound { id: placement_id })?;

        if new_level < 1 || new_level > curriculum.level_count {
            return Err(CoreError::LevelOutOfRange {
                level: new_level,
                level_count: curriculum.level_count,
            });
        }

        let blocking = self
            .catalog
            .prerequisites(&placement.course_id)
            .into_iter()
            .filter_map(|p| curriculum.level_of(&p.id).map(|level| (level, &p.id)))
            .max_by_key(|(level, _)| *level);

        if let Some((max_prerequisite_level, prereq_id)) = blocking {
            if new_level <= max_prerequisite_level {
                return Err(CoreError::PrerequisiteOrder {
                    course_id: placement.course_id.clone(),
                    requested_level: new_level,
                    max_prerequisite_level,
                    blocking_prerequisite: prereq_id.clone(),
                });
            }
        }

        let placement = curriculum
            .placement_mut(placement_id)
            .ok_or(CoreError::PlacementNotFound { id: placement_id })?;
        placement.level = new_level;
        Ok(placement.clone())
    }

    /// Updates a placement's display position. The level is untouched and
    /// nothing is validated.
    pub fn reposition(
        &self,
        curriculum: &mut Curriculum,
        placement_id: PlacementId,
        position: Position,
    ) -> Result<Placement, CoreError> {
        let placement = curriculum
            .placement_mut(placement_id)
            .ok_or(CoreError::PlacementNotFound { id: placement_id })?;
        placement.position = position;
        Ok(placement.clone())
    }

    /// Removes a placement. Dependents are neither removed nor re-validated.
    pub fn remove_placement(
        &self,
        curriculum: &mut Curriculum,
        placement_id: PlacementId,
    ) -> Result<Placement, CoreError> {
        curriculum
            .take_placement(placement_id)
            .ok_or(CoreError::PlacementNotFound { id: placement_id })
    }
}
