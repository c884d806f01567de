//! HTTP handler modules for the curriculum API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire the
//! service lock, delegate to [`CurriculumService`](crate::service::CurriculumService),
//! and return JSON responses. No business logic lives in handlers.

pub mod analysis;
pub mod catalog;
pub mod curricula;
pub mod health;
pub mod placements;
