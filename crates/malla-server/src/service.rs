//! CurriculumService: the single coordinator between HTTP handlers and the
//! placement engine and storage crates.
//!
//! Every mutating operation follows the same shape: load the curriculum,
//! apply one engine operation to the owned copy, and save it back only if
//! the operation succeeded. A rejected operation therefore never reaches
//! the store.

use tracing::{debug, info, warn};

use malla_core::analysis::{analyze_prerequisites, statistics, validate_plan};
use malla_core::coherence::evaluate_curriculum;
use malla_core::{
    Catalog, Coherence, CourseId, Curriculum, CurriculumId, InsertOutcome, LevelInfo,
    PlacementEngine, PlacementId, PlanValidation, PrerequisiteAnalysis, Statistics,
};
use malla_storage::{seed_defaults, CurriculumStore, CurriculumSummary};

use crate::error::ApiError;
use crate::schema::catalog::{CourseDetailResponse, CourseListResponse, CourseRef};
use crate::schema::curricula::{CreateCurriculumRequest, CurriculumView, PlacementView};
use crate::schema::placements::{
    InsertWithPrerequisitesRequest, InsertWithPrerequisitesResponse, RemovePlacementResponse,
    UpdatePlacementRequest, UpdatePlacementResponse,
};

/// The central service coordinating catalog queries and curriculum edits.
pub struct CurriculumService {
    store: Box<dyn CurriculumStore + Send>,
    /// Loaded once at startup; the catalog is read-only while serving.
    catalog: Catalog,
}

impl CurriculumService {
    /// Wraps a store, optionally seeding defaults, and loads the catalog.
    pub fn new(mut store: Box<dyn CurriculumStore + Send>, seed: bool) -> Result<Self, ApiError> {
        if seed {
            let report = seed_defaults(store.as_mut())?;
            if report.courses > 0 || report.curricula > 0 {
                info!(
                    courses = report.courses,
                    curricula = report.curricula,
                    "seeded default data"
                );
            }
        }
        let catalog = store.load_catalog()?;
        info!(
            courses = catalog.len(),
            prerequisites = catalog.edge_count(),
            "catalog loaded"
        );
        Ok(CurriculumService { store, catalog })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn engine(&self) -> PlacementEngine<'_> {
        PlacementEngine::new(&self.catalog)
    }

    fn load(&self, id: &CurriculumId) -> Result<Curriculum, ApiError> {
        Ok(self.store.load_curriculum(id)?)
    }

    // -----------------------------------------------------------------------
    // Catalog
    // -----------------------------------------------------------------------

    pub fn list_courses(&self) -> CourseListResponse {
        let courses: Vec<_> = self.catalog.courses().cloned().collect();
        CourseListResponse {
            total: courses.len(),
            courses,
        }
    }

    pub fn get_course(&self, id: &CourseId) -> Result<CourseDetailResponse, ApiError> {
        let course = self.catalog.require(id)?;
        let unresolved_prerequisites = course
            .prerequisites
            .iter()
            .filter(|p| !self.catalog.contains(p))
            .cloned()
            .collect();
        Ok(CourseDetailResponse {
            course: course.clone(),
            prerequisites: self
                .catalog
                .prerequisites(id)
                .into_iter()
                .map(CourseRef::from)
                .collect(),
            unresolved_prerequisites,
            dependents: self
                .catalog
                .dependents(id)
                .into_iter()
                .map(CourseRef::from)
                .collect(),
        })
    }

    // -----------------------------------------------------------------------
    // Curriculum management
    // -----------------------------------------------------------------------

    pub fn list_curricula(&self) -> Result<Vec<CurriculumSummary>, ApiError> {
        Ok(self.store.list_curricula()?)
    }

    pub fn create_curriculum(
        &mut self,
        req: CreateCurriculumRequest,
    ) -> Result<CurriculumView, ApiError> {
        if req.level_count == 0 {
            return Err(ApiError::bad_request("level_count must be at least 1"));
        }
        if req.name.trim().is_empty() {
            return Err(ApiError::bad_request("name must not be empty"));
        }
        let id = match req.id {
            Some(id) if !id.trim().is_empty() => id,
            Some(_) => return Err(ApiError::bad_request("id must not be empty")),
            None => format!("MALLA-{}", uuid::Uuid::new_v4().simple()),
        };

        let curriculum = Curriculum::new(
            id,
            req.name,
            req.program,
            req.target_credits,
            req.level_count,
        );
        self.store.create_curriculum(&curriculum)?;
        info!(curriculum = %curriculum.id, levels = curriculum.level_count, "curriculum created");
        Ok(CurriculumView::new(&curriculum, &self.catalog))
    }

    pub fn get_curriculum(&self, id: &CurriculumId) -> Result<CurriculumView, ApiError> {
        let curriculum = self.load(id)?;
        Ok(CurriculumView::new(&curriculum, &self.catalog))
    }

    pub fn delete_curriculum(&mut self, id: &CurriculumId) -> Result<(), ApiError> {
        self.store.delete_curriculum(id)?;
        info!(curriculum = %id, "curriculum deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Placement operations
    // -----------------------------------------------------------------------

    pub fn insert_with_prerequisites(
        &mut self,
        id: &CurriculumId,
        req: InsertWithPrerequisitesRequest,
    ) -> Result<InsertWithPrerequisitesResponse, ApiError> {
        let mut curriculum = self.load(id)?;
        let position = req.position.unwrap_or_default();

        let outcome = self
            .engine()
            .insert_with_prerequisites(&mut curriculum, &req.course_id, req.level, position)
            .inspect_err(|e| {
                warn!(curriculum = %id, course = %req.course_id, error = %e, "insert rejected");
            })?;

        if !req.dry_run {
            self.store.save_curriculum(&curriculum)?;
        }
        info!(
            curriculum = %id,
            course = %req.course_id,
            requested_level = outcome.level_info.requested_level,
            used_level = outcome.level_info.used_level,
            auto_added = outcome.auto_added.len(),
            dry_run = req.dry_run,
            "course placed"
        );

        Ok(self.insert_response(outcome, !req.dry_run))
    }

    fn insert_response(
        &self,
        outcome: InsertOutcome,
        committed: bool,
    ) -> InsertWithPrerequisitesResponse {
        let name = self
            .catalog
            .get(&outcome.primary.course_id)
            .map_or_else(|| outcome.primary.course_id.to_string(), |c| c.name.clone());
        InsertWithPrerequisitesResponse {
            success: true,
            message: insert_message(&name, &outcome.level_info, outcome.auto_added.len()),
            primary_placement: PlacementView::new(&outcome.primary, &self.catalog),
            auto_added_prerequisites: outcome
                .auto_added
                .iter()
                .map(|p| PlacementView::new(p, &self.catalog))
                .collect(),
            level_info: outcome.level_info,
            committed,
        }
    }

    /// Applies a level move and/or a reposition. The level move is validated
    /// first, so a rejected move leaves the position untouched too.
    pub fn update_placement(
        &mut self,
        id: &CurriculumId,
        placement_id: PlacementId,
        req: UpdatePlacementRequest,
    ) -> Result<UpdatePlacementResponse, ApiError> {
        if req.level.is_none() && req.position.is_none() {
            return Err(ApiError::bad_request(
                "at least one of level or position is required",
            ));
        }

        let mut curriculum = self.load(id)?;
        let engine = PlacementEngine::new(&self.catalog);

        let mut placement = None;
        if let Some(level) = req.level {
            let moved = engine
                .move_placement(&mut curriculum, placement_id, level)
                .inspect_err(|e| {
                    warn!(curriculum = %id, placement = %placement_id, error = %e, "move rejected");
                })?;
            debug!(curriculum = %id, placement = %placement_id, level, "placement moved");
            placement = Some(moved);
        }
        if let Some(position) = req.position {
            placement = Some(engine.reposition(&mut curriculum, placement_id, position)?);
        }
        let placement = placement
            .ok_or_else(|| ApiError::InternalError("placement update produced no result".into()))?;

        self.store.save_curriculum(&curriculum)?;
        info!(curriculum = %id, placement = %placement_id, level = placement.level, "placement updated");

        Ok(UpdatePlacementResponse {
            success: true,
            placement: PlacementView::new(&placement, &self.catalog),
        })
    }

    pub fn remove_placement(
        &mut self,
        id: &CurriculumId,
        placement_id: PlacementId,
    ) -> Result<RemovePlacementResponse, ApiError> {
        let mut curriculum = self.load(id)?;
        let removed = self.engine().remove_placement(&mut curriculum, placement_id)?;
        self.store.save_curriculum(&curriculum)?;
        info!(curriculum = %id, placement = %placement_id, course = %removed.course_id, "placement removed");

        Ok(RemovePlacementResponse {
            success: true,
            message: format!("course {} removed from level {}", removed.course_id, removed.level),
            removed: PlacementView::new(&removed, &self.catalog),
        })
    }

    // -----------------------------------------------------------------------
    // Analysis
    // -----------------------------------------------------------------------

    pub fn coherence(&self, id: &CurriculumId) -> Result<Coherence, ApiError> {
        let curriculum = self.load(id)?;
        Ok(evaluate_curriculum(&curriculum, &self.catalog))
    }

    pub fn statistics(&self, id: &CurriculumId) -> Result<Statistics, ApiError> {
        let curriculum = self.load(id)?;
        Ok(statistics(&curriculum, &self.catalog))
    }

    pub fn validation(&self, id: &CurriculumId) -> Result<PlanValidation, ApiError> {
        let curriculum = self.load(id)?;
        Ok(validate_plan(&curriculum, &self.catalog))
    }

    pub fn prerequisite_analysis(
        &self,
        id: &CurriculumId,
        course_id: &CourseId,
    ) -> Result<PrerequisiteAnalysis, ApiError> {
        let curriculum = self.load(id)?;
        Ok(analyze_prerequisites(&curriculum, &self.catalog, course_id)?)
    }
}

/// Builds the user-facing confirmation for an insertion.
pub fn insert_message(course_name: &str, info: &LevelInfo, auto_added: usize) -> String {
    let mut message = format!("{course_name} placed at level {}", info.used_level);
    if info.adjusted {
        if info.used_level > info.requested_level {
            message.push_str(&format!(
                " (requested level {} raised to the minimum level {} its prerequisites allow)",
                info.requested_level, info.min_level
            ));
        } else {
            message.push_str(&format!(
                " (requested level {} clamped to the last level)",
                info.requested_level
            ));
        }
    }
    if auto_added > 0 {
        message.push_str(&format!(
            "; {auto_added} prerequisite(s) added automatically"
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use malla_core::Position;
    use malla_storage::{InMemoryStore, DEFAULT_CURRICULUM_ID};

    fn service() -> CurriculumService {
        CurriculumService::new(Box::new(InMemoryStore::new()), true).unwrap()
    }

    fn malla() -> CurriculumId {
        CurriculumId::new(DEFAULT_CURRICULUM_ID)
    }

    fn insert(course: &str, level: u32) -> InsertWithPrerequisitesRequest {
        InsertWithPrerequisitesRequest {
            course_id: course.into(),
            level,
            position: Some(Position::new(300, 200)),
            dry_run: false,
        }
    }

    #[test]
    fn message_mentions_adjustment_and_auto_inserts() {
        let info = LevelInfo {
            requested_level: 1,
            used_level: 3,
            adjusted: true,
            tree_depth: 3,
            min_level: 3,
        };
        let msg = insert_message("Algoritmos Avanzados", &info, 2);
        assert!(msg.contains("placed at level 3"));
        assert!(msg.contains("raised to the minimum level 3"));
        assert!(msg.contains("2 prerequisite(s)"));
    }

    #[test]
    fn insert_persists_only_when_committed() {
        let mut svc = service();
        let mut req = insert("PROG104", 1);
        req.dry_run = true;
        let preview = svc.insert_with_prerequisites(&malla(), req).unwrap();
        assert!(!preview.committed);
        assert_eq!(preview.auto_added_prerequisites.len(), 2);
        assert!(svc.get_curriculum(&malla()).unwrap().placements.is_empty());

        let done = svc.insert_with_prerequisites(&malla(), insert("PROG104", 1)).unwrap();
        assert!(done.committed);
        assert_eq!(done.level_info.used_level, 3);
        assert_eq!(svc.get_curriculum(&malla()).unwrap().placements.len(), 3);
    }

    #[test]
    fn rejected_move_does_not_reposition() {
        let mut svc = service();
        let out = svc.insert_with_prerequisites(&malla(), insert("PROG102", 2)).unwrap();
        let err = svc
            .update_placement(
                &malla(),
                out.primary_placement.id,
                UpdatePlacementRequest {
                    level: Some(1),
                    position: Some(Position::new(1, 1)),
                },
            )
            .unwrap_err();
        assert_eq!(err.code(), "PREREQUISITE_ORDER");

        let view = svc.get_curriculum(&malla()).unwrap();
        let p = view
            .placements
            .iter()
            .find(|p| p.id == out.primary_placement.id)
            .unwrap();
        assert_eq!(p.level, 2);
        assert_eq!(p.position, Position::new(300, 200));
    }

    #[test]
    fn empty_update_is_bad_request() {
        let mut svc = service();
        let err = svc
            .update_placement(&malla(), PlacementId(1), UpdatePlacementRequest::default())
            .unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[test]
    fn create_generates_ids() {
        let mut svc = service();
        let view = svc
            .create_curriculum(CreateCurriculumRequest {
                id: None,
                name: "Nueva".into(),
                program: "Sistemas".into(),
                target_credits: 30,
                level_count: 3,
            })
            .unwrap();
        assert!(view.id.as_str().starts_with("MALLA-"));
        assert_eq!(svc.list_curricula().unwrap().len(), 2);
    }
}
