//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It implements
//! `axum::response::IntoResponse` to produce structured JSON error responses
//! with appropriate HTTP status codes. Placement rejections keep their
//! structured context in `details`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use malla_core::CoreError;
use malla_storage::StorageError;

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "DUPLICATE_COURSE").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Entity not found (404).
    #[error("not found: {message}")]
    NotFound { code: &'static str, message: String },

    /// Invalid request (400).
    #[error("bad request: {message}")]
    BadRequest { code: &'static str, message: String },

    /// Resource conflict (409).
    #[error("conflict: {message}")]
    Conflict {
        code: &'static str,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Well-formed request the placement rules reject (422).
    #[error("rejected: {message}")]
    Rejected {
        code: &'static str,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }

    /// Machine-readable code reported in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound { code, .. }
            | ApiError::BadRequest { code, .. }
            | ApiError::Conflict { code, .. }
            | ApiError::Rejected { code, .. } => *code,
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();
        let detail = match self {
            ApiError::NotFound { message, .. } | ApiError::BadRequest { message, .. } => {
                ApiErrorDetail {
                    code,
                    message,
                    details: None,
                }
            }
            ApiError::Conflict {
                message, details, ..
            }
            | ApiError::Rejected {
                message, details, ..
            } => ApiErrorDetail {
                code,
                message,
                details,
            },
            ApiError::InternalError(message) => ApiErrorDetail {
                code,
                message,
                details: None,
            },
        };

        let body = json!({
            "success": false,
            "error": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            code: "INVALID_BODY",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest {
            code: "INVALID_PATH",
            message: rejection.body_text(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::DuplicateCourse {
                course_id,
                name,
                code,
                level,
                placement_id,
            } => ApiError::Conflict {
                code: "DUPLICATE_COURSE",
                message,
                details: Some(json!({
                    "course_id": course_id,
                    "name": name,
                    "code": code,
                    "level": level,
                    "placement_id": placement_id,
                })),
            },
            CoreError::LevelCapacity {
                course_id,
                requested_level,
                min_level,
                level_count,
            } => ApiError::Rejected {
                code: "LEVEL_CAPACITY",
                message,
                details: Some(json!({
                    "course_id": course_id,
                    "requested_level": requested_level,
                    "min_level": min_level,
                    "level_count": level_count,
                })),
            },
            CoreError::PrerequisiteOrder {
                course_id,
                requested_level,
                max_prerequisite_level,
                blocking_prerequisite,
            } => ApiError::Rejected {
                code: "PREREQUISITE_ORDER",
                message,
                details: Some(json!({
                    "course_id": course_id,
                    "requested_level": requested_level,
                    "max_prerequisite_level": max_prerequisite_level,
                    "blocking_prerequisite": blocking_prerequisite,
                })),
            },
            CoreError::UnknownCourse { .. } => ApiError::NotFound {
                code: "UNKNOWN_COURSE",
                message,
            },
            CoreError::PlacementNotFound { .. } => ApiError::NotFound {
                code: "PLACEMENT_NOT_FOUND",
                message,
            },
            CoreError::LevelOutOfRange { .. } => ApiError::BadRequest {
                code: "LEVEL_OUT_OF_RANGE",
                message,
            },
            CoreError::SelfPrerequisite { .. } | CoreError::DuplicateCatalogEntry { .. } => {
                ApiError::InternalError(message)
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::CurriculumNotFound(_) => ApiError::NotFound {
                code: "CURRICULUM_NOT_FOUND",
                message: err.to_string(),
            },
            StorageError::CourseNotFound(_) => ApiError::NotFound {
                code: "UNKNOWN_COURSE",
                message: err.to_string(),
            },
            StorageError::AlreadyExists(_) => ApiError::Conflict {
                code: "CURRICULUM_EXISTS",
                message: err.to_string(),
                details: None,
            },
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}
