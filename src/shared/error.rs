//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::services::MessageError;

/// Coarse classification of failures, independent of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced entity does not exist
    NotFound,
    /// The request breaks a domain rule or is malformed
    Validation,
    /// The request conflicts with current state. Reserved; nothing reports it yet.
    Conflict,
    /// A collaborator failed; retrying later may succeed
    Transient,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] MessageError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Validation error: {0}")]
    Validation(String, Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl AppError {
    /// HTTP status and numeric application code for this error.
    pub fn status_and_code(&self) -> (StatusCode, u16) {
        match self {
            AppError::Service(e) => match e.kind() {
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, 10001),
                // Malformed input rather than a broken domain rule
                ErrorKind::Validation if matches!(e, MessageError::InvalidIdentifier(_)) => {
                    (StatusCode::BAD_REQUEST, 10002)
                }
                ErrorKind::Validation => (StatusCode::UNPROCESSABLE_ENTITY, 10008),
                ErrorKind::Conflict => (StatusCode::CONFLICT, 10005),
                ErrorKind::Transient => (StatusCode::SERVICE_UNAVAILABLE, 10000),
            },
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, 10001),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, 10002),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, 10003),
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, 10006),
            AppError::Validation(..) => (StatusCode::BAD_REQUEST, 10007),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, 10000),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = match self {
            AppError::Service(e) => ErrorResponse {
                code,
                message: e.to_string(),
                kind: Some(e.code()),
                errors: None,
            },
            AppError::Validation(message, errors) => ErrorResponse {
                code,
                message,
                kind: Some("VALIDATION_FAILED"),
                errors: (!errors.is_empty()).then_some(errors),
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse {
                    code,
                    message: "Internal server error".into(),
                    kind: None,
                    errors: None,
                }
            }
            AppError::NotFound(message)
            | AppError::BadRequest(message)
            | AppError::Unauthorized(message) => ErrorResponse {
                code,
                message,
                kind: None,
                errors: None,
            },
            AppError::RateLimited => ErrorResponse {
                code,
                message: "Rate limited".into(),
                kind: None,
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
