//! Curriculum placement CLI.
//!
//! Provides the `malla` binary for editing curricula stored in the same
//! SQLite database the HTTP server uses. Every command prints its result as
//! JSON on stdout.
//!
//! Exit codes: 0 = success, 1 = operation rejected, 3 = storage/I/O error.

use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use malla_core::coherence::evaluate_curriculum;
use malla_core::{CoreError, CourseId, Curriculum, CurriculumId, Level, PlacementEngine, PlacementId, Position};
use malla_storage::{seed_defaults, CurriculumStore, SqliteStore, StorageError, DEFAULT_CURRICULUM_ID};

/// Curriculum editor with prerequisite-aware placement.
#[derive(Parser, Debug)]
#[command(name = "malla", about = "Curriculum editor with prerequisite-aware placement")]
struct Cli {
    /// Path to the curriculum database file.
    #[arg(short, long, global = true, default_value = "malla.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Seed the default catalog and curriculum into an empty database.
    Seed,

    /// List the course catalog.
    Courses,

    /// Show a curriculum and its placements.
    Show {
        #[arg(short, long, default_value = DEFAULT_CURRICULUM_ID)]
        curriculum: String,
    },

    /// Place a course, auto-inserting missing prerequisites.
    Insert {
        course_id: String,

        /// Requested level (may be adjusted).
        #[arg(short, long)]
        level: Level,

        #[arg(short, long, default_value = DEFAULT_CURRICULUM_ID)]
        curriculum: String,

        #[arg(long, default_value_t = 0)]
        x: i32,

        #[arg(long, default_value_t = 0)]
        y: i32,

        /// Print the outcome without saving it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Move a placement to another level.
    Move {
        placement_id: u32,

        #[arg(short, long)]
        level: Level,

        #[arg(short, long, default_value = DEFAULT_CURRICULUM_ID)]
        curriculum: String,
    },

    /// Remove a placement.
    Remove {
        placement_id: u32,

        #[arg(short, long, default_value = DEFAULT_CURRICULUM_ID)]
        curriculum: String,
    },

    /// Check placed credits against the curriculum's target.
    Coherence {
        #[arg(short, long, default_value = DEFAULT_CURRICULUM_ID)]
        curriculum: String,
    },
}

/// Failure of a single command, carrying its exit code.
enum CliError {
    Rejected(CoreError),
    Storage(StorageError),
}

impl From<CoreError> for CliError {
    fn from(e: CoreError) -> Self {
        CliError::Rejected(e)
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        CliError::Storage(e)
    }
}

fn main() {
    let cli = Cli::parse();
    process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let mut store = match SqliteStore::new(&cli.db) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: failed to open database '{}': {}", cli.db, e);
            return 3;
        }
    };

    match run_command(&mut store, cli.command) {
        Ok(()) => 0,
        Err(CliError::Rejected(e)) => {
            eprintln!("Rejected: {}", e);
            1
        }
        Err(CliError::Storage(e)) => {
            eprintln!("Storage error: {}", e);
            3
        }
    }
}

fn run_command(store: &mut SqliteStore, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Seed => {
            let report = seed_defaults(store)?;
            print_json(&serde_json::json!({
                "courses": report.courses,
                "curricula": report.curricula,
            }));
        }
        Commands::Courses => {
            print_json(&store.list_courses()?);
        }
        Commands::Show { curriculum } => {
            print_json(&store.load_curriculum(&CurriculumId(curriculum))?);
        }
        Commands::Insert {
            course_id,
            level,
            curriculum,
            x,
            y,
            dry_run,
        } => {
            let catalog = store.load_catalog()?;
            let mut c = store.load_curriculum(&CurriculumId(curriculum))?;
            let outcome = PlacementEngine::new(&catalog).insert_with_prerequisites(
                &mut c,
                &CourseId(course_id),
                level,
                Position::new(x, y),
            )?;
            save_unless(store, &c, dry_run)?;
            print_json(&outcome);
        }
        Commands::Move {
            placement_id,
            level,
            curriculum,
        } => {
            let catalog = store.load_catalog()?;
            let mut c = store.load_curriculum(&CurriculumId(curriculum))?;
            let moved = PlacementEngine::new(&catalog).move_placement(
                &mut c,
                PlacementId(placement_id),
                level,
            )?;
            store.save_curriculum(&c)?;
            print_json(&moved);
        }
        Commands::Remove {
            placement_id,
            curriculum,
        } => {
            let catalog = store.load_catalog()?;
            let mut c = store.load_curriculum(&CurriculumId(curriculum))?;
            let removed =
                PlacementEngine::new(&catalog).remove_placement(&mut c, PlacementId(placement_id))?;
            store.save_curriculum(&c)?;
            print_json(&removed);
        }
        Commands::Coherence { curriculum } => {
            let catalog = store.load_catalog()?;
            let c = store.load_curriculum(&CurriculumId(curriculum))?;
            print_json(&evaluate_curriculum(&c, &catalog));
        }
    }
    Ok(())
}

fn save_unless(store: &mut SqliteStore, c: &Curriculum, dry_run: bool) -> Result<(), StorageError> {
    if dry_run {
        return Ok(());
    }
    store.save_curriculum(c)
}

/// Prints a value as pretty JSON to stdout.
fn print_json<T: Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize result: {}\"}}", e));
    println!("{}", json);
}
