//! Default catalog and curriculum.
//!
//! A fresh database is seeded with a ten-course systems-engineering catalog
//! and one empty four-level curriculum, `MALLA001`.

use malla_core::{Course, Curriculum, CurriculumId, Difficulty};

use crate::error::StorageError;
use crate::traits::CurriculumStore;

pub const DEFAULT_CURRICULUM_ID: &str = "MALLA001";

/// The default course catalog.
pub fn default_courses() -> Vec<Course> {
    use Difficulty::{Easy, Hard, Intermediate};

    let course = |id: &str, name: &str, credits, prereqs: &[&str], difficulty, description: &str| {
        let mut c = Course::new(id, name, credits)
            .with_prerequisites(prereqs.iter().copied())
            .with_difficulty(difficulty);
        c.description = Some(description.to_string());
        c
    };

    vec![
        course("PROG101", "Introducción a la Programación", 3, &[], Easy, "Conceptos básicos de programación"),
        course("PROG102", "Programación Orientada a Objetos", 4, &["PROG101"], Intermediate, "POO y patrones de diseño"),
        course("PROG103", "Estructuras de Datos", 4, &["PROG101"], Intermediate, "Listas, árboles, grafos"),
        course("PROG104", "Algoritmos Avanzados", 4, &["PROG103"], Hard, "Análisis y optimización de algoritmos"),
        course("BD101", "Bases de Datos I", 3, &["PROG101"], Intermediate, "Diseño relacional de bases de datos"),
        course("BD102", "Bases de Datos II", 3, &["BD101"], Intermediate, "Optimización y transacciones"),
        course("MATH101", "Cálculo I", 4, &[], Easy, "Límites, derivadas e integrales"),
        course("MATH102", "Álgebra Lineal", 3, &[], Easy, "Matrices y espacios vectoriales"),
        course("WEB101", "Desarrollo Web Frontend", 3, &["PROG102"], Intermediate, "HTML, CSS, JavaScript"),
        course("WEB102", "Desarrollo Web Backend", 3, &["WEB101", "BD101"], Intermediate, "APIs REST y frameworks backend"),
    ]
}

/// The default empty curriculum.
pub fn default_curriculum() -> Curriculum {
    Curriculum::new(
        DEFAULT_CURRICULUM_ID,
        "Malla Curricular",
        "Ingeniería de Sistemas",
        48,
        4,
    )
}

/// What [`seed_defaults`] wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub courses: usize,
    pub curricula: usize,
}

/// Seeds the default catalog when the store has no courses, and the default
/// curriculum when it is missing. Existing data is never overwritten.
pub fn seed_defaults(store: &mut dyn CurriculumStore) -> Result<SeedReport, StorageError> {
    let mut report = SeedReport::default();

    if store.list_courses()?.is_empty() {
        for course in default_courses() {
            store.upsert_course(&course)?;
            report.courses += 1;
        }
    }

    let id = CurriculumId::new(DEFAULT_CURRICULUM_ID);
    match store.load_curriculum(&id) {
        Ok(_) => {}
        Err(StorageError::CurriculumNotFound(_)) => {
            store.create_curriculum(&default_curriculum())?;
            report.curricula += 1;
        }
        Err(e) => return Err(e),
    }

    Ok(report)
}
