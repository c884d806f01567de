//! Application state with a shared `CurriculumService`.
//!
//! [`AppState`] wraps the service in `Arc<tokio::sync::Mutex<>>` for use with
//! axum handlers. `tokio::sync::Mutex` lets handlers await the lock without
//! blocking the runtime. An `RwLock` is not an option: the SQLite store holds
//! a `rusqlite::Connection`, which is `!Sync`.

use std::sync::Arc;

use malla_storage::{CurriculumStore, InMemoryStore, SqliteStore};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::service::CurriculumService;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<tokio::sync::Mutex<CurriculumService>>,
}

impl AppState {
    /// Creates an `AppState` backed by the SQLite database in `config`.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let store = SqliteStore::new(&config.db_path)?;
        Self::with_store(Box::new(store), config.seed)
    }

    /// Creates a seeded `AppState` over an in-memory store (for testing).
    pub fn in_memory() -> Result<Self, ApiError> {
        Self::with_store(Box::new(InMemoryStore::new()), true)
    }

    pub fn with_store(
        store: Box<dyn CurriculumStore + Send>,
        seed: bool,
    ) -> Result<Self, ApiError> {
        let service = CurriculumService::new(store, seed)?;
        Ok(AppState {
            service: Arc::new(tokio::sync::Mutex::new(service)),
        })
    }
}
