//! SQLite implementation of [`CurriculumStore`].
//!
//! [`SqliteStore`] persists the catalog and curricula in a SQLite database
//! with WAL mode, a transaction around every multi-row write, and automatic
//! schema migrations. Each entity maps onto plain columns; prerequisite
//! lists and placements live in child tables.

use rusqlite::{params, Connection, OptionalExtension, Row};

use malla_core::{
    Course, CourseId, Curriculum, CurriculumId, Difficulty, Placement, PlacementId, Position,
};

use crate::error::StorageError;
use crate::traits::CurriculumStore;
use crate::types::CurriculumSummary;

/// SQLite-backed implementation of [`CurriculumStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn curriculum_exists(&self, id: &CurriculumId) -> Result<bool, StorageError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM curricula WHERE id = ?1)",
            params![id.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
        let difficulty: String = row.get(5)?;
        Ok(Course {
            id: CourseId(row.get(0)?),
            name: row.get(1)?,
            code: row.get(2)?,
            credits: row.get(3)?,
            hours: row.get(4)?,
            prerequisites: Vec::new(),
            difficulty: Difficulty::from_name(&difficulty),
            description: row.get(6)?,
        })
    }

    fn load_prerequisites(&self, course_id: &CourseId) -> Result<Vec<CourseId>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT prerequisite_id FROM course_prerequisites
             WHERE course_id = ?1 ORDER BY position",
        )?;
        let ids = stmt
            .query_map(params![course_id.as_str()], |row| {
                row.get::<_, String>(0).map(CourseId)
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn load_placements(&self, id: &CurriculumId) -> Result<Vec<Placement>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, course_id, level, pos_x, pos_y FROM placements
             WHERE curriculum_id = ?1 ORDER BY id",
        )?;
        let placements = stmt
            .query_map(params![id.as_str()], |row| {
                Ok(Placement {
                    id: PlacementId(row.get(0)?),
                    course_id: CourseId(row.get(1)?),
                    level: row.get(2)?,
                    position: Position {
                        x: row.get(3)?,
                        y: row.get(4)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(placements)
    }

    /// Writes the curriculum row and replaces its placements.
    ///
    /// Runs inside the caller's transaction.
    fn write_curriculum(
        tx: &rusqlite::Transaction<'_>,
        curriculum: &Curriculum,
    ) -> Result<(), StorageError> {
        tx.execute(
            "INSERT INTO curricula (id, name, program, target_credits, level_count, next_placement_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                program = excluded.program,
                target_credits = excluded.target_credits,
                level_count = excluded.level_count,
                next_placement_id = excluded.next_placement_id",
            params![
                curriculum.id.as_str(),
                curriculum.name,
                curriculum.program,
                curriculum.target_credits,
                curriculum.level_count,
                curriculum.next_placement_id(),
            ],
        )?;

        tx.execute(
            "DELETE FROM placements WHERE curriculum_id = ?1",
            params![curriculum.id.as_str()],
        )?;

        let mut stmt = tx.prepare_cached(
            "INSERT INTO placements (curriculum_id, id, course_id, level, pos_x, pos_y)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for p in curriculum.placements() {
            stmt.execute(params![
                curriculum.id.as_str(),
                p.id.0,
                p.course_id.as_str(),
                p.level,
                p.position.x,
                p.position.y,
            ])?;
        }
        Ok(())
    }
}

impl CurriculumStore for SqliteStore {
    fn upsert_course(&mut self, course: &Course) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO courses (id, name, code, credits, hours, difficulty, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                code = excluded.code,
                credits = excluded.credits,
                hours = excluded.hours,
                difficulty = excluded.difficulty,
                description = excluded.description",
            params![
                course.id.as_str(),
                course.name,
                course.code,
                course.credits,
                course.hours,
                course.difficulty.as_str(),
                course.description,
            ],
        )?;

        tx.execute(
            "DELETE FROM course_prerequisites WHERE course_id = ?1",
            params![course.id.as_str()],
        )?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO course_prerequisites (course_id, position, prerequisite_id)
                 VALUES (?1, ?2, ?3)",
            )?;
            for (position, prereq) in course.prerequisites.iter().enumerate() {
                stmt.execute(params![course.id.as_str(), position as i64, prereq.as_str()])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn get_course(&self, id: &CourseId) -> Result<Course, StorageError> {
        let course = self
            .conn
            .query_row(
                "SELECT id, name, code, credits, hours, difficulty, description
                 FROM courses WHERE id = ?1",
                params![id.as_str()],
                Self::course_from_row,
            )
            .optional()?
            .ok_or_else(|| StorageError::CourseNotFound(id.clone()))?;

        Ok(Course {
            prerequisites: self.load_prerequisites(id)?,
            ..course
        })
    }

    fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, code, credits, hours, difficulty, description
             FROM courses ORDER BY rowid",
        )?;
        let courses = stmt
            .query_map([], Self::course_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        courses
            .into_iter()
            .map(|course| {
                let prerequisites = self.load_prerequisites(&course.id)?;
                Ok(Course {
                    prerequisites,
                    ..course
                })
            })
            .collect()
    }

    fn create_curriculum(&mut self, curriculum: &Curriculum) -> Result<(), StorageError> {
        if self.curriculum_exists(&curriculum.id)? {
            return Err(StorageError::AlreadyExists(curriculum.id.clone()));
        }
        let tx = self.conn.transaction()?;
        Self::write_curriculum(&tx, curriculum)?;
        tx.commit()?;
        Ok(())
    }

    fn load_curriculum(&self, id: &CurriculumId) -> Result<Curriculum, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT name, program, target_credits, level_count, next_placement_id
                 FROM curricula WHERE id = ?1",
                params![id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, u32>(2)?,
                        row.get::<_, u32>(3)?,
                        row.get::<_, u32>(4)?,
                    ))
                },
            )
            .optional()?
            .ok_or_else(|| StorageError::CurriculumNotFound(id.clone()))?;
        let (name, program, target_credits, level_count, next_placement_id) = row;

        let placements = self.load_placements(id)?;
        if let Some(p) = placements.iter().find(|p| p.id.0 >= next_placement_id) {
            return Err(StorageError::IntegrityError {
                reason: format!(
                    "placement {} in curriculum {} is not below the next id {}",
                    p.id, id, next_placement_id
                ),
            });
        }

        Ok(Curriculum::from_parts(
            id.clone(),
            name,
            program,
            target_credits,
            level_count,
            placements,
            next_placement_id,
        ))
    }

    fn save_curriculum(&mut self, curriculum: &Curriculum) -> Result<(), StorageError> {
        if !self.curriculum_exists(&curriculum.id)? {
            return Err(StorageError::CurriculumNotFound(curriculum.id.clone()));
        }
        let tx = self.conn.transaction()?;
        Self::write_curriculum(&tx, curriculum)?;
        tx.commit()?;
        Ok(())
    }

    fn delete_curriculum(&mut self, id: &CurriculumId) -> Result<(), StorageError> {
        // Placements go with it via ON DELETE CASCADE.
        let deleted = self
            .conn
            .execute("DELETE FROM curricula WHERE id = ?1", params![id.as_str()])?;
        if deleted == 0 {
            return Err(StorageError::CurriculumNotFound(id.clone()));
        }
        Ok(())
    }

    fn list_curricula(&self) -> Result<Vec<CurriculumSummary>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT c.id, c.name, c.program, c.target_credits, c.level_count,
                    (SELECT COUNT(*) FROM placements p WHERE p.curriculum_id = c.id)
             FROM curricula c ORDER BY c.rowid",
        )?;
        let summaries = stmt
            .query_map([], |row| {
                Ok(CurriculumSummary {
                    id: CurriculumId(row.get(0)?),
                    name: row.get(1)?,
                    program: row.get(2)?,
                    target_credits: row.get(3)?,
                    level_count: row.get(4)?,
                    placement_count: row.get::<_, i64>(5)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }
}
