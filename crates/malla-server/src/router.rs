//! Router assembly for the curriculum HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! tracing, CORS and timeout middleware layers.

use std::time::Duration;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        // Catalog
        .route("/courses", get(handlers::catalog::list_courses))
        .route("/courses/{course_id}", get(handlers::catalog::get_course))
        // Curriculum management
        .route(
            "/curricula",
            get(handlers::curricula::list_curricula)
                .post(handlers::curricula::create_curriculum),
        )
        .route(
            "/curricula/{id}",
            get(handlers::curricula::get_curriculum)
                .delete(handlers::curricula::delete_curriculum),
        )
        // Placement operations
        .route(
            "/curricula/{id}/placements/with-prerequisites",
            post(handlers::placements::insert_with_prerequisites),
        )
        .route(
            "/curricula/{id}/placements/{placement_id}",
            put(handlers::placements::update_placement)
                .delete(handlers::placements::remove_placement),
        )
        // Analysis
        .route(
            "/curricula/{id}/coherence",
            get(handlers::analysis::coherence),
        )
        .route(
            "/curricula/{id}/statistics",
            get(handlers::analysis::statistics),
        )
        .route(
            "/curricula/{id}/validation",
            get(handlers::analysis::validation),
        )
        .route(
            "/curricula/{id}/courses/{course_id}/prerequisites",
            get(handlers::analysis::prerequisites),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
