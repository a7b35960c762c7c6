//! Query request and response models.
//!
//! These types define the wire contract of the `/query` endpoint. The
//! request is a typed structure validated at the boundary before the
//! pipeline runs; the response is one of two success shapes depending on
//! whether the synthesized statement was a read or a write.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A JSON object mapping column names to values.
pub type JsonRow = serde_json::Map<String, serde_json::Value>;

/// Request body for the `/query` endpoint.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QueryRequest {
    /// Natural-language description of the desired query.
    #[serde(default)]
    #[validate(length(min = 1, message = "prompt is required"))]
    pub prompt: String,

    /// Credentials of the database to run against.
    pub connection: Option<ConnectionInfo>,
}

impl QueryRequest {
    /// Boundary validation: both the prompt and the connection details must
    /// be present. This is the only validation applied; field contents are
    /// passed to the driver as-is.
    pub fn into_validated(self) -> Option<(String, ConnectionInfo)> {
        if self.validate().is_err() {
            return None;
        }
        let connection = self.connection?;
        Some((self.prompt, connection))
    }
}

/// Caller-supplied database credentials. Held only for the duration of the
/// request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConnectionInfo {
    /// Database host.
    pub host: String,

    /// Database port.
    pub port: u16,

    /// Database username.
    pub user: String,

    /// Database password (never serialized back out).
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Database name.
    pub database: String,
}

/// Successful response body for the `/query` endpoint.
///
/// Serializes untagged: a read produces `{sql, data}` and a write produces
/// `{sql, message}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum QueryOutcome {
    /// A read query with its materialized rows.
    Rows {
        /// The synthesized SQL statement.
        sql: String,
        /// Every returned row as a column-to-value mapping.
        #[schema(value_type = Vec<Object>)]
        data: Vec<JsonRow>,
    },

    /// A write statement with its affected-row count.
    Affected {
        /// The synthesized SQL statement.
        sql: String,
        /// Message of the form `<N> rows affected.`.
        message: String,
    },
}

impl QueryOutcome {
    /// Builds the write outcome from an affected-row count.
    pub fn affected(sql: String, rows: u64) -> Self {
        QueryOutcome::Affected {
            sql,
            message: format!("{rows} rows affected."),
        }
    }
}
