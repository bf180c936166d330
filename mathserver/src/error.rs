//! Error types for the math server
//!
//! `ApiError` is the request-boundary taxonomy; each variant maps to one HTTP
//! status and a `{ "error": message }` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::{CalculationId, SharedError, logging};
use thiserror::Error;
use tracing::debug;

use crate::SERVICE_NAME;
use crate::core::formatter;

pub const MISSING_OPERANDS: &str = "Please provide two numbers (num1 and num2)";
pub const MISSING_OPERATION: &str =
    "Please provide an operation (add, subtract, multiply, or divide)";
pub const MALFORMED_BODY: &str = "Request body must be a JSON object";
pub const INVALID_LIMIT: &str = "limit must be a positive integer";

/// History store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Calculation not found: {0}")]
    NotFound(CalculationId),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt history journal at line {line}: {message}")]
    Corrupt { line: usize, message: String },

    #[error("History conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced to HTTP callers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Invalid operation. Use: add, subtract, multiply, or divide")]
    UnknownOperation(String),

    #[error("Cannot divide by zero!")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFiniteResult,

    #[error("Calculation not found")]
    NotFound(CalculationId),

    #[error("Failed to access calculation history")]
    Store(#[source] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::UnknownOperation(_)
            | ApiError::DivisionByZero
            | ApiError::NonFiniteResult => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Backend detail stays in the log, the client gets the generic message
        match &self {
            ApiError::Store(cause) => logging::log_error(SERVICE_NAME, "History store access", cause),
            other => debug!(status = %other.status_code(), "Rejected request: {}", other),
        }

        (self.status_code(), Json(formatter::error_body(&self))).into_response()
    }
}

/// Startup and serving failures
#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed on {address}: {message}")]
    ServerStartupFailed { address: String, message: String },

    #[error("HTTP server error: {0}")]
    ServeFailed(String),

    #[error("Configuration error: {0}")]
    Config(#[from] SharedError),

    #[error("History store error: {0}")]
    Store(#[from] StoreError),
}

pub type WebServerResult<T> = Result<T, WebServerError>;
