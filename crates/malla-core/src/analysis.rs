//! Read-only curriculum analysis: aggregate statistics, plan validation and
//! per-course prerequisite analysis.
//!
//! Nothing here mutates. Move and remove deliberately leave prerequisite
//! ordering unchecked for the rest of the curriculum; [`validate_plan`] is
//! how a caller finds out what they left behind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::course::Difficulty;
use crate::curriculum::Curriculum;
use crate::error::CoreError;
use crate::id::{CourseId, Level, PlacementId};

/// Plans below this many credits get a [`RecommendationKind::FewCredits`].
const MIN_RECOMMENDED_CREDITS: u32 = 30;
/// Plans spread over fewer levels get a [`RecommendationKind::Concentrated`].
const MIN_RECOMMENDED_LEVELS: usize = 2;
const MIN_INTERMEDIATE_COURSES: usize = 2;

/// Qualitative academic load derived from average credits per used level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicLoad {
    Empty,
    Light,
    Normal,
    Heavy,
    VeryHeavy,
}

impl AcademicLoad {
    fn from_average(average: f64) -> Self {
        if average < 12.0 {
            AcademicLoad::Light
        } else if average < 16.0 {
            AcademicLoad::Normal
        } else if average < 20.0 {
            AcademicLoad::Heavy
        } else {
            AcademicLoad::VeryHeavy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_placements: usize,
    pub total_credits: u32,
    pub total_hours: u32,
    /// Credits per level; only levels holding at least one placement appear.
    pub credits_per_level: BTreeMap<Level, u32>,
    pub levels_used: usize,
    /// Average credits over used levels, rounded to two decimals.
    pub average_credits_per_level: f64,
    /// Keyed by [`Difficulty::as_str`]; every difficulty is present.
    pub courses_by_difficulty: BTreeMap<String, usize>,
    pub academic_load: AcademicLoad,
}

/// Computes aggregate statistics. Placements whose course is no longer in
/// the catalog are counted but contribute no credits or hours.
pub fn statistics(curriculum: &Curriculum, catalog: &Catalog) -> Statistics {
    let mut courses_by_difficulty: BTreeMap<String, usize> =
        [Difficulty::Easy, Difficulty::Intermediate, Difficulty::Hard]
            .iter()
            .map(|d| (d.as_str().to_string(), 0))
            .collect();
    let mut credits_per_level: BTreeMap<Level, u32> = BTreeMap::new();
    let mut total_credits = 0;
    let mut total_hours = 0;

    for placement in curriculum.placements() {
        let entry = credits_per_level.entry(placement.level).or_insert(0);
        let Some(course) = catalog.get(&placement.course_id) else {
            continue;
        };
        *entry += course.credits;
        total_credits += course.credits;
        total_hours += course.effective_hours();
        *courses_by_difficulty
            .entry(course.difficulty.as_str().to_string())
            .or_insert(0) += 1;
    }

    let levels_used = credits_per_level.len();
    let (average_credits_per_level, academic_load) = if levels_used == 0 {
        (0.0, AcademicLoad::Empty)
    } else {
        let average = f64::from(total_credits) / levels_used as f64;
        (
            (average * 100.0).round() / 100.0,
            AcademicLoad::from_average(average),
        )
    };

    Statistics {
        total_placements: curriculum.placements().len(),
        total_credits,
        total_hours,
        credits_per_level,
        levels_used,
        average_credits_per_level,
        courses_by_difficulty,
        academic_load,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The prerequisite is not placed at all.
    MissingPrerequisite,
    /// The prerequisite is placed at the same or a later level.
    OutOfOrder,
}

/// One broken prerequisite relation in a curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub placement_id: PlacementId,
    pub course_id: CourseId,
    pub level: Level,
    pub prerequisite_id: CourseId,
    /// Level of the prerequisite, when it is placed.
    pub prerequisite_level: Option<Level>,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// No easy course is placed.
    AddFoundations,
    /// Fewer than two intermediate courses are placed.
    AddIntermediate,
    /// No hard course is placed.
    AddSpecialization,
    /// At least one prerequisite relation is broken.
    ReviewPrerequisites,
    FewCredits,
    /// Every placement sits on a single level (or there are none).
    Concentrated,
    /// Nothing else applies.
    LooksGood,
}

impl RecommendationKind {
    fn message(&self) -> &'static str {
        match self {
            RecommendationKind::AddFoundations => {
                "Add foundational courses such as an introduction to programming or calculus"
            }
            RecommendationKind::AddIntermediate => {
                "Consider adding more intermediate courses to deepen the plan"
            }
            RecommendationKind::AddSpecialization => {
                "Add specialization courses such as web development or advanced algorithms"
            }
            RecommendationKind::ReviewPrerequisites => {
                "Review prerequisites: some courses are missing their dependencies or sit too early"
            }
            RecommendationKind::FewCredits => "The plan has few credits; consider adding more courses",
            RecommendationKind::Concentrated => {
                "The plan is too concentrated; spread the courses over more levels"
            }
            RecommendationKind::LooksGood => {
                "The plan looks good; keep adding courses that match your interests"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
}

impl From<RecommendationKind> for Recommendation {
    fn from(kind: RecommendationKind) -> Self {
        Recommendation {
            kind,
            message: kind.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanValidation {
    /// `true` when no prerequisite relation is broken.
    pub valid: bool,
    pub total_credits: u32,
    /// Distinct levels holding at least one placement.
    pub levels_used: usize,
    pub violations: Vec<Violation>,
    /// Never empty: [`RecommendationKind::LooksGood`] when nothing else fires.
    pub recommendations: Vec<Recommendation>,
}

/// Lists every placed course whose resolvable prerequisite is missing or
/// not strictly earlier, in placement order, and derives recommendations
/// from the plan's composition.
pub fn validate_plan(curriculum: &Curriculum, catalog: &Catalog) -> PlanValidation {
    let mut violations = Vec::new();

    for placement in curriculum.placements() {
        for prereq in catalog.prerequisites(&placement.course_id) {
            let prerequisite_level = curriculum.level_of(&prereq.id);
            let kind = match prerequisite_level {
                None => ViolationKind::MissingPrerequisite,
                Some(level) if level >= placement.level => ViolationKind::OutOfOrder,
                Some(_) => continue,
            };
            violations.push(Violation {
                placement_id: placement.id,
                course_id: placement.course_id.clone(),
                level: placement.level,
                prerequisite_id: prereq.id.clone(),
                prerequisite_level,
                kind,
            });
        }
    }

    let stats = statistics(curriculum, catalog);
    let recommendations = recommend(&stats, &violations);

    PlanValidation {
        valid: violations.is_empty(),
        total_credits: stats.total_credits,
        levels_used: stats.levels_used,
        violations,
        recommendations,
    }
}

fn recommend(stats: &Statistics, violations: &[Violation]) -> Vec<Recommendation> {
    let count = |d: Difficulty| {
        stats
            .courses_by_difficulty
            .get(d.as_str())
            .copied()
            .unwrap_or(0)
    };

    let mut kinds = Vec::new();
    if count(Difficulty::Easy) == 0 {
        kinds.push(RecommendationKind::AddFoundations);
    }
    if count(Difficulty::Intermediate) < MIN_INTERMEDIATE_COURSES {
        kinds.push(RecommendationKind::AddIntermediate);
    }
    if count(Difficulty::Hard) == 0 {
        kinds.push(RecommendationKind::AddSpecialization);
    }
    if !violations.is_empty() {
        kinds.push(RecommendationKind::ReviewPrerequisites);
    }
    if stats.total_credits < MIN_RECOMMENDED_CREDITS {
        kinds.push(RecommendationKind::FewCredits);
    }
    if stats.levels_used < MIN_RECOMMENDED_LEVELS {
        kinds.push(RecommendationKind::Concentrated);
    }
    if kinds.is_empty() {
        kinds.push(RecommendationKind::LooksGood);
    }
    kinds.into_iter().map(Recommendation::from).collect()
}

/// One direct prerequisite of the analyzed course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteStatus {
    pub course_id: CourseId,
    pub name: String,
    pub code: String,
    pub credits: u32,
    pub difficulty: Difficulty,
    pub placed_level: Option<Level>,
}

impl PrerequisiteStatus {
    pub fn is_placed(&self) -> bool {
        self.placed_level.is_some()
    }
}

/// How ready a curriculum is to take one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteAnalysis {
    pub course_id: CourseId,
    pub name: String,
    /// Whether the course lists any prerequisite, resolvable or not.
    pub has_prerequisites: bool,
    /// Level of the course itself, when it is already placed.
    pub placed_level: Option<Level>,
    /// Resolved direct prerequisites, in authored order.
    pub prerequisites: Vec<PrerequisiteStatus>,
    /// Listed prerequisite IDs missing from the catalog.
    pub unresolved: Vec<CourseId>,
    pub missing_count: usize,
    /// Credits of all resolved direct prerequisites, placed or not.
    pub required_credits: u32,
    /// `true` when every resolved direct prerequisite is already placed,
    /// i.e. an insert would not auto-add anything one level down.
    pub can_add: bool,
}

/// Checks the direct prerequisites of `course_id` against `curriculum`.
///
/// Fails with [`CoreError::UnknownCourse`] when the course is not in the
/// catalog.
pub fn analyze_prerequisites(
    curriculum: &Curriculum,
    catalog: &Catalog,
    course_id: &CourseId,
) -> Result<PrerequisiteAnalysis, CoreError> {
    let course = catalog.require(course_id)?;

    let prerequisites: Vec<PrerequisiteStatus> = catalog
        .prerequisites(course_id)
        .into_iter()
        .map(|prereq| PrerequisiteStatus {
            course_id: prereq.id.clone(),
            name: prereq.name.clone(),
            code: prereq.code.clone(),
            credits: prereq.credits,
            difficulty: prereq.difficulty,
            placed_level: curriculum.level_of(&prereq.id),
        })
        .collect();
    let unresolved = course
        .prerequisites
        .iter()
        .filter(|id| !catalog.contains(id))
        .cloned()
        .collect();
    let missing_count = prerequisites.iter().filter(|p| !p.is_placed()).count();

    Ok(PrerequisiteAnalysis {
        course_id: course.id.clone(),
        name: course.name.clone(),
        has_prerequisites: !course.prerequisites.is_empty(),
        placed_level: curriculum.level_of(course_id),
        required_credits: prerequisites.iter().map(|p| p.credits).sum(),
        missing_count,
        can_add: missing_count == 0,
        prerequisites,
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::Course;
    use crate::curriculum::Position;
    use crate::placement::PlacementEngine;

    fn catalog() -> Catalog {
        Catalog::from_courses(vec![
            Course::new("A", "A", 4).with_hours(64),
            Course::new("B", "B", 3)
                .with_prerequisites(["A"])
                .with_difficulty(Difficulty::Intermediate),
            Course::new("C", "C", 5)
                .with_prerequisites(["B"])
                .with_difficulty(Difficulty::Hard),
        ])
        .unwrap()
    }

    #[test]
    fn empty_curriculum_statistics() {
        let c = Curriculum::new("M", "m", "p", 48, 4);
        let stats = statistics(&c, &catalog());
        assert_eq!(stats.total_placements, 0);
        assert_eq!(stats.levels_used, 0);
        assert_eq!(stats.academic_load, AcademicLoad::Empty);
        assert_eq!(stats.courses_by_difficulty["hard"], 0);
    }

    #[test]
    fn statistics_aggregate_by_level_and_difficulty() {
        let catalog = catalog();
        let engine = PlacementEngine::new(&catalog);
        let mut c = Curriculum::new("M", "m", "p", 48, 4);
        engine
            .insert_with_prerequisites(&mut c, &"C".into(), 3, Position::default())
            .unwrap();

        let stats = statistics(&c, &catalog);
        assert_eq!(stats.total_placements, 3);
        assert_eq!(stats.total_credits, 12);
        assert_eq!(stats.total_hours, 64 + 48 + 48);
        assert_eq!(stats.levels_used, 3);
        assert_eq!(stats.credits_per_level[&1], 4);
        assert_eq!(stats.credits_per_level[&3], 5);
        assert_eq!(stats.average_credits_per_level, 4.0);
        assert_eq!(stats.academic_load, AcademicLoad::Light);
        assert_eq!(stats.courses_by_difficulty["easy"], 1);
        assert_eq!(stats.courses_by_difficulty["intermediate"], 1);
        assert_eq!(stats.courses_by_difficulty["hard"], 1);
    }

    #[test]
    fn load_thresholds() {
        assert_eq!(AcademicLoad::from_average(11.99), AcademicLoad::Light);
        assert_eq!(AcademicLoad::from_average(12.0), AcademicLoad::Normal);
        assert_eq!(AcademicLoad::from_average(16.0), AcademicLoad::Heavy);
        assert_eq!(AcademicLoad::from_average(20.0), AcademicLoad::VeryHeavy);
    }

    fn kinds(report: &PlanValidation) -> Vec<RecommendationKind> {
        report.recommendations.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn empty_plan_gets_every_composition_recommendation() {
        let report = validate_plan(&Curriculum::new("M", "m", "p", 48, 4), &catalog());
        assert!(report.valid);
        assert_eq!(report.total_credits, 0);
        assert_eq!(report.levels_used, 0);
        assert_eq!(
            kinds(&report),
            vec![
                RecommendationKind::AddFoundations,
                RecommendationKind::AddIntermediate,
                RecommendationKind::AddSpecialization,
                RecommendationKind::FewCredits,
                RecommendationKind::Concentrated,
            ]
        );
    }

    #[test]
    fn balanced_plan_looks_good() {
        let catalog = Catalog::from_courses(vec![
            Course::new("E", "E", 10),
            Course::new("I1", "I1", 6)
                .with_prerequisites(["E"])
                .with_difficulty(Difficulty::Intermediate),
            Course::new("I2", "I2", 6)
                .with_prerequisites(["E"])
                .with_difficulty(Difficulty::Intermediate),
            Course::new("H", "H", 8)
                .with_prerequisites(["I1", "I2"])
                .with_difficulty(Difficulty::Hard),
        ])
        .unwrap();
        let engine = PlacementEngine::new(&catalog);
        let mut c = Curriculum::new("M", "m", "p", 48, 4);
        engine
            .insert_with_prerequisites(&mut c, &"H".into(), 3, Position::default())
            .unwrap();

        let report = validate_plan(&c, &catalog);
        assert!(report.valid);
        assert_eq!(report.total_credits, 30);
        assert_eq!(report.levels_used, 3);
        assert_eq!(kinds(&report), vec![RecommendationKind::LooksGood]);
        assert!(!report.recommendations[0].message.is_empty());
    }

    #[test]
    fn inserted_plan_is_valid() {
        let catalog = catalog();
        let engine = PlacementEngine::new(&catalog);
        let mut c = Curriculum::new("M", "m", "p", 48, 4);
        engine
            .insert_with_prerequisites(&mut c, &"C".into(), 4, Position::default())
            .unwrap();
        assert!(validate_plan(&c, &catalog).valid);
    }

    #[test]
    fn remove_and_move_leave_detectable_violations() {
        let catalog = catalog();
        let engine = PlacementEngine::new(&catalog);
        let mut c = Curriculum::new("M", "m", "p", 48, 4);
        let out = engine
            .insert_with_prerequisites(&mut c, &"C".into(), 3, Position::default())
            .unwrap();
        let a = out.auto_added[0].id;
        let b = out.auto_added[1].id;

        // B moves above C; A is removed out from under B.
        engine.move_placement(&mut c, b, 4).unwrap();
        engine.remove_placement(&mut c, a).unwrap();

        let report = validate_plan(&c, &catalog);
        assert!(!report.valid);
        let violation_kinds: Vec<_> = report
            .violations
            .iter()
            .map(|v| (v.course_id.as_str(), v.prerequisite_id.as_str(), v.kind))
            .collect();
        assert_eq!(
            violation_kinds,
            vec![
                ("C", "B", ViolationKind::OutOfOrder),
                ("B", "A", ViolationKind::MissingPrerequisite),
            ]
        );
        assert!(kinds(&report).contains(&RecommendationKind::ReviewPrerequisites));
    }

    #[test]
    fn prerequisite_analysis_reports_missing_and_placed() {
        let catalog = catalog();
        let engine = PlacementEngine::new(&catalog);
        let mut c = Curriculum::new("M", "m", "p", 48, 4);

        let before = analyze_prerequisites(&c, &catalog, &"B".into()).unwrap();
        assert!(before.has_prerequisites);
        assert_eq!(before.prerequisites.len(), 1);
        assert_eq!(before.prerequisites[0].placed_level, None);
        assert_eq!(before.missing_count, 1);
        assert_eq!(before.required_credits, 4);
        assert!(!before.can_add);

        engine
            .insert_with_prerequisites(&mut c, &"A".into(), 1, Position::default())
            .unwrap();
        let after = analyze_prerequisites(&c, &catalog, &"B".into()).unwrap();
        assert_eq!(after.prerequisites[0].placed_level, Some(1));
        assert_eq!(after.missing_count, 0);
        assert!(after.can_add);
        assert_eq!(after.placed_level, None);
    }

    #[test]
    fn prerequisite_analysis_of_root_and_unknown_courses() {
        let catalog = Catalog::from_courses(vec![
            Course::new("A", "A", 4),
            Course::new("B", "B", 3).with_prerequisites(["A", "GONE"]),
        ])
        .unwrap();
        let c = Curriculum::new("M", "m", "p", 48, 4);

        let root = analyze_prerequisites(&c, &catalog, &"A".into()).unwrap();
        assert!(!root.has_prerequisites);
        assert!(root.can_add);
        assert_eq!(root.required_credits, 0);

        let b = analyze_prerequisites(&c, &catalog, &"B".into()).unwrap();
        assert_eq!(b.unresolved, vec![CourseId::from("GONE")]);
        assert_eq!(b.missing_count, 1);

        let err = analyze_prerequisites(&c, &catalog, &"NOPE".into()).unwrap_err();
        assert!(matches!(err, CoreError::UnknownCourse { .. }));
    }
}
