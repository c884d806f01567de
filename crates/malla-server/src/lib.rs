//! HTTP/JSON API server for editing curricula against a course catalog.
//!
//! Exposes the placement engine (insert with prerequisites, move, remove)
//! plus catalog, coherence, statistics and validation queries. This crate
//! contains the server framework, API schema types, error handling, and
//! route definitions.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
