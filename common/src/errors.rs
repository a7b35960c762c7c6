//! Application error types.
//!
//! The error taxonomy is flat by design: requests fail with one of a small
//! set of conditions, and every failure is rendered to the caller as a JSON
//! body of the form `{"error": "..."}` with HTTP 200. The service itself
//! never treats a request failure as fatal.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Convenience alias for results carrying an [`AppError`].
pub type AppResult<T> = Result<T, AppError>;

/// All failure conditions a request can hit.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body lacks a prompt or connection details.
    #[error("Prompt or DB connection details missing.")]
    MissingInput,

    /// The database handle could not be constructed from the supplied
    /// credentials. No distinction is made between cause categories.
    #[error("Invalid connection: {0}")]
    InvalidConnection(String),

    /// Schema introspection failed for a named table. The first failing
    /// table aborts the whole request; no partial schema is used.
    #[error("Schema error for '{table}': {message}")]
    SchemaProbe { table: String, message: String },

    /// The language model service call failed (transport or API error).
    #[error("language model request failed: {0}")]
    LlmService(String),

    /// Executing the synthesized SQL failed. Carries the driver's message.
    #[error("SQL execution failed: {0}")]
    SqlExecution(String),

    /// Catch-all for anything else.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The string surfaced to the caller in the `error` field.
    ///
    /// Missing input and schema-probe failures have fixed wordings; every
    /// other condition is wrapped as a generic server error carrying the
    /// underlying message.
    pub fn wire_message(&self) -> String {
        match self {
            AppError::MissingInput | AppError::SchemaProbe { .. } => self.to_string(),
            other => format!("Server error: {other}"),
        }
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.wire_message(),
        };
        // Logical errors ride on 200; the body shape is the contract.
        (StatusCode::OK, Json(body)).into_response()
    }
}
