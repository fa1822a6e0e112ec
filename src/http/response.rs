//! Response shaping and error mapping.
//!
//! # Responsibilities
//! - Translate every failure class into one HTTP status, once, at the edge
//! - Map extractor rejections (body, path, query) to 400/413/415
//! - Keep internal failure detail in the logs, out of response bodies

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::resources::{FieldViolation, ServiceError, ValidationError};

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden(Option<String>),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldViolation]>,
}

impl ErrorBody<'_> {
    fn message(message: &str) -> ErrorBody<'_> {
        ErrorBody {
            message,
            errors: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::message(&message))).into_response()
            }
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    message: "Validation failed",
                    errors: Some(err.violations.as_slice()),
                }),
            )
                .into_response(),
            ApiError::UnsupportedMediaType(message) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ErrorBody::message(&message)),
            )
                .into_response(),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorBody::message("Request body is too large")),
            )
                .into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            ApiError::Forbidden(None) => StatusCode::FORBIDDEN.into_response(),
            ApiError::Forbidden(Some(message)) => {
                (StatusCode::FORBIDDEN, Json(ErrorBody::message(&message))).into_response()
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Unexpected error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::message(UNEXPECTED_ERROR)),
                )
                    .into_response()
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => ApiError::Validation(e),
            ServiceError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "Invalid request body");
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType(
                "Request body must be JSON. Set Content-Type to application/json.".into(),
            ),
            r if r.status() == StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
            _ => ApiError::BadRequest(
                "Invalid request body. Ensure Content-Type is application/json and body is valid JSON."
                    .into(),
            ),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "Invalid query parameters");
        ApiError::BadRequest(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "Invalid path parameter");
        ApiError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}
