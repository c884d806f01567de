//! Storage abstraction for course catalogs and curricula.
//!
//! Provides the [`CurriculumStore`] trait defining the storage contract that
//! all backends implement, plus the [`InMemoryStore`] and [`SqliteStore`] as
//! first-class backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: CurriculumSummary listing type
//! - [`traits`]: CurriculumStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL schema and migration setup
//! - [`sqlite`]: SqliteStore implementation
//! - [`seed`]: default catalog and curriculum

pub mod error;
pub mod memory;
pub mod schema;
pub mod seed;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use seed::{seed_defaults, SeedReport, DEFAULT_CURRICULUM_ID};
pub use sqlite::SqliteStore;
pub use traits::CurriculumStore;
pub use types::CurriculumSummary;
