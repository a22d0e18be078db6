//! Custom error types for the API service
//!
//! Every failure raised anywhere in the service funnels through `ApiError`.
//! Handlers only return `ApiResult`; the error-translation middleware in
//! [`crate::middleware`] renders the single structured body defined here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use common::error::DatabaseError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Service name stamped on every error response
pub const SERVICE_NAME: &str = "taskfodge";

/// A field-level validation error record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub rejected_value: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        rejected_value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rejected_value: rejected_value.into(),
            message: message.into(),
        }
    }
}

/// The structured error body every failure is rendered as
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    pub trace_id: Uuid,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    /// Build a body for `status`, minting the timestamp and a fresh trace id.
    pub fn of(
        status: StatusCode,
        message: impl Into<String>,
        path: impl Into<String>,
        errors: Option<Vec<FieldError>>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: message.into(),
            path: path.into(),
            trace_id: Uuid::new_v4(),
            service: SERVICE_NAME.to_string(),
            errors,
        }
    }
}

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request-body validation failure with field detail
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unauthenticated access
    #[error("Unauthorized")]
    Unauthorized,

    /// Access denied
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Method not allowed on this route
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Domain conflict, e.g. a duplicate unique field
    #[error("{0}")]
    Conflict(String),

    /// Database error; uniqueness violations surface as conflicts
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status this failure kind maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(db) if db.is_unique_violation() => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message; lower-level detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Validation(_) => "Validation failed".to_string(),
            ApiError::BadRequest(message) => message.clone(),
            ApiError::Unauthorized => "Unauthorized".to_string(),
            ApiError::Forbidden(message) => message.clone(),
            ApiError::NotFound(message) => message.clone(),
            ApiError::MethodNotAllowed => "Method not allowed".to_string(),
            ApiError::Conflict(message) => message.clone(),
            ApiError::Database(db) if db.is_unique_violation() => "Database error".to_string(),
            ApiError::Database(_) | ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Field detail for validation-class failures
    pub fn field_errors(&self) -> Option<Vec<FieldError>> {
        match self {
            ApiError::Validation(errors) => Some(errors.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    /// Emit the status and stash the error for the translation middleware,
    /// which owns the request path needed to finish the body.
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = status.into_response();
        response.extensions_mut().insert(Arc::new(self));
        response
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
