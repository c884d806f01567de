//! End-to-end integration tests for the curriculum HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! CurriculumService -> placement engine/storage -> HTTP response.
//!
//! Each test creates a fresh AppState over a seeded in-memory store, so the
//! default catalog and the empty `MALLA001` curriculum are always present.
//! Tests use `tower::ServiceExt::oneshot` to send requests directly to the
//! router without starting a network server.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use malla_server::router::build_router;
use malla_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn test_app() -> Router {
    let state = AppState::in_memory().expect("failed to create in-memory AppState");
    build_router(state, Duration::from_secs(10))
}

/// Sends a request with an optional JSON body and returns (status, json).
async fn send(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", path, None).await
}

async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", path, Some(body)).await
}

async fn put_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", path, Some(body)).await
}

async fn delete(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", path, None).await
}

const INSERT: &str = "/curricula/MALLA001/placements/with-prerequisites";

async fn place(app: &Router, course: &str, level: u32) -> serde_json::Value {
    let (status, body) = post_json(app, INSERT, json!({ "course_id": course, "level": level })).await;
    assert_eq!(status, StatusCode::OK, "insert {course} failed: {body:?}");
    body
}

/// Returns the placement ID of `course` in MALLA001.
async fn placement_id(app: &Router, course: &str) -> u64 {
    let (_, body) = get_json(app, "/curricula/MALLA001").await;
    body["placements"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["course_id"] == course)
        .and_then(|p| p["id"].as_u64())
        .unwrap_or_else(|| panic!("{course} not placed: {body:?}"))
}

// ---------------------------------------------------------------------------
// Catalog and curriculum management
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_catalog_size() {
    let app = test_app();
    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["courses"], 10);
}

#[tokio::test]
async fn catalog_lists_seeded_courses() {
    let app = test_app();
    let (status, body) = get_json(&app, "/courses").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);
    assert_eq!(body["courses"][0]["id"], "PROG101");

    let (status, body) = get_json(&app, "/courses/WEB102").await;
    assert_eq!(status, StatusCode::OK);
    let prereqs: Vec<_> = body["prerequisites"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(prereqs, vec!["WEB101", "BD101"]);

    let (status, body) = get_json(&app, "/courses/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNKNOWN_COURSE");
}

#[tokio::test]
async fn curriculum_lifecycle() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/curricula",
        json!({ "id": "M2", "name": "Second", "program": "Sistemas", "target_credits": 30, "level_count": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body:?}");
    assert_eq!(body["id"], "M2");

    let (status, body) = post_json(
        &app,
        "/curricula",
        json!({ "id": "M2", "name": "Again", "target_credits": 30, "level_count": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body:?}");

    let (_, body) = get_json(&app, "/curricula").await;
    assert_eq!(body["curricula"].as_array().unwrap().len(), 2);

    let (status, _) = delete(&app, "/curricula/M2").await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get_json(&app, "/curricula/M2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "CURRICULUM_NOT_FOUND");
}

#[tokio::test]
async fn zero_levels_is_rejected() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/curricula",
        json!({ "name": "Flat", "target_credits": 30, "level_count": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Placement operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_chain_reports_level_info() {
    let app = test_app();
    // PROG104 <- PROG103 <- PROG101.
    let body = place(&app, "PROG104", 1).await;

    assert_eq!(body["success"], true);
    assert_eq!(
        body["level_info"],
        json!({
            "requested_level": 1,
            "used_level": 3,
            "adjusted": true,
            "tree_depth": 3,
            "min_level": 3
        })
    );
    assert_eq!(body["primary_placement"]["level"], 3);
    assert_eq!(body["primary_placement"]["name"], "Algoritmos Avanzados");
    let auto: Vec<_> = body["auto_added_prerequisites"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| (p["course_id"].as_str().unwrap().to_string(), p["level"].as_u64().unwrap()))
        .collect();
    assert_eq!(
        auto,
        vec![("PROG101".to_string(), 1), ("PROG103".to_string(), 2)]
    );
    assert!(body["message"].as_str().unwrap().contains("level 3"));
}

#[tokio::test]
async fn duplicate_insert_is_conflict_and_changes_nothing() {
    let app = test_app();
    place(&app, "PROG102", 2).await;
    let (_, before) = get_json(&app, "/curricula/MALLA001").await;

    let (status, body) = post_json(&app, INSERT, json!({ "course_id": "PROG101", "level": 3 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_COURSE");
    assert_eq!(body["error"]["details"]["level"], 1);
    assert_eq!(body["error"]["details"]["name"], "Introducción a la Programación");

    let (_, after) = get_json(&app, "/curricula/MALLA001").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn capacity_error_when_chain_is_too_deep() {
    let app = test_app();
    let (status, _) = post_json(
        &app,
        "/curricula",
        json!({ "id": "SHORT", "name": "Short", "target_credits": 20, "level_count": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        &app,
        "/curricula/SHORT/placements/with-prerequisites",
        json!({ "course_id": "PROG104", "level": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "LEVEL_CAPACITY");
    assert_eq!(body["error"]["details"]["min_level"], 3);

    let (_, body) = get_json(&app, "/curricula/SHORT").await;
    assert!(body["placements"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn move_respects_placed_prerequisites() {
    let app = test_app();
    place(&app, "PROG101", 2).await;
    place(&app, "PROG102", 3).await;
    let id = placement_id(&app, "PROG102").await;
    let path = format!("/curricula/MALLA001/placements/{id}");

    for level in [2, 1] {
        let (status, body) = put_json(&app, &path, json!({ "level": level })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body:?}");
        assert_eq!(body["error"]["code"], "PREREQUISITE_ORDER");
        assert_eq!(body["error"]["details"]["blocking_prerequisite"], "PROG101");
    }

    let (status, body) = put_json(&app, &path, json!({ "level": 4 })).await;
    assert_eq!(status, StatusCode::OK, "{body:?}");
    assert_eq!(body["placement"]["level"], 4);
    assert_eq!(body["placement"]["id"], id);

    let (status, body) = put_json(&app, &path, json!({ "level": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "LEVEL_OUT_OF_RANGE");
}

#[tokio::test]
async fn reposition_only_changes_position() {
    let app = test_app();
    place(&app, "MATH101", 1).await;
    let id = placement_id(&app, "MATH101").await;

    let (status, body) = put_json(
        &app,
        &format!("/curricula/MALLA001/placements/{id}"),
        json!({ "position": { "x": 42, "y": 7 } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["placement"]["level"], 1);
    assert_eq!(body["placement"]["position"], json!({ "x": 42, "y": 7 }));
}

#[tokio::test]
async fn remove_leaves_dependents_and_validation_reports_it() {
    let app = test_app();
    place(&app, "PROG102", 2).await;
    let id = placement_id(&app, "PROG101").await;

    let (status, body) = delete(&app, &format!("/curricula/MALLA001/placements/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"]["course_id"], "PROG101");

    let (status, body) = delete(&app, &format!("/curricula/MALLA001/placements/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "PLACEMENT_NOT_FOUND");

    let (_, body) = get_json(&app, "/curricula/MALLA001/validation").await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["violations"][0]["course_id"], "PROG102");
    assert_eq!(body["violations"][0]["kind"], "missing_prerequisite");
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[tokio::test]
async fn coherence_and_statistics() {
    let app = test_app();
    let (_, body) = get_json(&app, "/curricula/MALLA001/coherence").await;
    assert_eq!(body["status"], "warning");
    assert_eq!(body["target_credits"], 48);

    // 3 + 4 + 4 credits over three levels.
    place(&app, "PROG104", 3).await;
    let (status, body) = get_json(&app, "/curricula/MALLA001/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_placements"], 3);
    assert_eq!(body["total_credits"], 11);
    assert_eq!(body["levels_used"], 3);
    assert_eq!(body["academic_load"], "light");
    assert_eq!(body["courses_by_difficulty"]["hard"], 1);

    let (status, _) = get_json(&app, "/curricula/NOPE/coherence").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_reports_totals_and_recommendations() {
    let app = test_app();
    let (status, body) = get_json(&app, "/curricula/MALLA001/validation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["total_credits"], 0);
    assert_eq!(body["levels_used"], 0);
    let kinds: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"few_credits"), "{kinds:?}");
    assert!(kinds.contains(&"concentrated"), "{kinds:?}");
    assert!(!kinds.contains(&"looks_good"));

    place(&app, "PROG104", 3).await;
    let (_, body) = get_json(&app, "/curricula/MALLA001/validation").await;
    assert_eq!(body["total_credits"], 11);
    assert_eq!(body["levels_used"], 3);
}

#[tokio::test]
async fn prerequisite_analysis_tracks_the_curriculum() {
    let app = test_app();
    let path = "/curricula/MALLA001/courses/PROG102/prerequisites";

    let (status, body) = get_json(&app, path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_prerequisites"], true);
    assert_eq!(body["prerequisites"][0]["course_id"], "PROG101");
    assert_eq!(body["prerequisites"][0]["placed_level"], json!(null));
    assert_eq!(body["missing_count"], 1);
    assert_eq!(body["required_credits"], 3);
    assert_eq!(body["can_add"], false);

    place(&app, "PROG101", 1).await;
    let (_, body) = get_json(&app, path).await;
    assert_eq!(body["prerequisites"][0]["placed_level"], 1);
    assert_eq!(body["missing_count"], 0);
    assert_eq!(body["can_add"], true);

    let (status, body) =
        get_json(&app, "/curricula/MALLA001/courses/NOPE/prerequisites").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "UNKNOWN_COURSE");

    let (status, _) = get_json(&app, "/curricula/NOPE/courses/PROG102/prerequisites").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_body_uses_error_envelope() {
    let app = test_app();

    let (status, body) = post_json(&app, INSERT, json!({ "course_id": "PROG101", "level": -1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_BODY");

    let (status, body) = post_json(&app, INSERT, json!({ "level": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_BODY");

    let (_, body) = get_json(&app, "/curricula/MALLA001").await;
    assert_eq!(body["placements"], json!([]));
}

#[tokio::test]
async fn non_numeric_placement_id_uses_error_envelope() {
    let app = test_app();
    let (status, body) = delete(&app, "/curricula/MALLA001/placements/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_PATH");
}

#[tokio::test]
async fn extreme_drop_point_is_accepted() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        INSERT,
        json!({
            "course_id": "PROG102",
            "level": 2,
            "position": { "x": i32::MIN, "y": i32::MAX },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body:?}");
    assert_eq!(
        body["auto_added_prerequisites"][0]["position"],
        json!({ "x": i32::MIN, "y": i32::MAX })
    );
}
