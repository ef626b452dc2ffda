//! Protocol types for the database bridge worker.
//!
//! The worker is a small child process that owns the actual ODBC
//! connections. It speaks NDJSON over stdin/stdout: one request or
//! response envelope per line, correlated by id. The crate stays
//! driver-agnostic; the worker gets a dialect's driver string and a
//! connection string and does the rest.

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnDescription, TableDescription};

// ============================================================================
// Request/Response Envelope
// ============================================================================

/// Request envelope sent to the worker.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    /// Unique request ID for correlation.
    pub id: String,
    /// Method name (e.g., "schema.tables").
    pub method: String,
    /// Method-specific parameters.
    pub params: serde_json::Value,
}

/// Response envelope received from the worker.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response corresponds to.
    pub id: String,
    /// Whether the request succeeded.
    pub success: bool,
    /// Result data (present if success = true).
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Error information (present if success = false).
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// Error information in a failed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorInfo {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

// ============================================================================
// Connection Parameters (included in connection-opening requests)
// ============================================================================

/// Database connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// ODBC driver string (from the dialect tag).
    pub driver: String,
    /// Driver-specific connection string.
    pub connection_string: String,
}

// ============================================================================
// Method Names
// ============================================================================

/// Worker method names.
pub mod methods {
    pub const SCHEMA_TABLES: &str = "schema.tables";
    pub const SCHEMA_COLUMNS: &str = "schema.columns";
    pub const SQL_EXECUTE: &str = "sql.execute";
    pub const CURSOR_OPEN: &str = "cursor.open";
    pub const CURSOR_FETCH: &str = "cursor.fetch";
    pub const CURSOR_CLOSE: &str = "cursor.close";
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Parameters for `schema.tables`.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaTablesParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    /// The SQL text of the catalog query to run.
    pub sql: String,
}

/// Parameters for `schema.columns`.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaColumnsParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    /// The SQL text of the catalog query to run.
    pub sql: String,
}

/// Parameters for `sql.execute`.
#[derive(Debug, Clone, Serialize)]
pub struct SqlExecuteParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    /// Statement to execute.
    pub sql: String,
    /// Positional arguments for `?` placeholders (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<serde_json::Value>>,
}

/// Parameters for `cursor.open`.
#[derive(Debug, Clone, Serialize)]
pub struct CursorOpenParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    /// Query whose result set the cursor iterates.
    pub sql: String,
}

/// Parameters for `cursor.fetch`.
#[derive(Debug, Clone, Serialize)]
pub struct CursorFetchParams {
    pub cursor_id: String,
    /// Upper bound on rows per batch.
    pub max_rows: u32,
}

/// Parameters for `cursor.close`.
#[derive(Debug, Clone, Serialize)]
pub struct CursorCloseParams {
    pub cursor_id: String,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response from `schema.tables`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaTablesResponse {
    pub tables: Vec<TableDescription>,
}

/// Response from `schema.columns`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaColumnsResponse {
    pub columns: Vec<ColumnDescription>,
}

/// Response from `sql.execute`.
#[derive(Debug, Clone, Deserialize)]
pub struct SqlExecuteResponse {
    #[serde(default)]
    pub rows_affected: u64,
}

/// Response from `cursor.open`.
#[derive(Debug, Clone, Deserialize)]
pub struct CursorOpenResponse {
    pub cursor_id: String,
}

/// Response from `cursor.fetch`. Cells arrive as JSON values; typed
/// decoding is the worker's concern.
#[derive(Debug, Clone, Deserialize)]
pub struct CursorFetchResponse {
    pub rows: Vec<Vec<serde_json::Value>>,
    /// True when the result set is exhausted.
    #[serde(default)]
    pub done: bool,
}

/// Response from `cursor.close`.
#[derive(Debug, Clone, Deserialize)]
pub struct CursorCloseResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope_serialization() {
        let request = RequestEnvelope {
            id: "req-1".to_string(),
            method: methods::SCHEMA_TABLES.to_string(),
            params: serde_json::json!({
                "driver": "{MySQL ODBC 8.0 Unicode Driver}",
                "connection_string": "SERVER=localhost;DATABASE=shop;",
                "sql": "SELECT ...",
            }),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("req-1"));
        assert!(json.contains("schema.tables"));
    }

    #[test]
    fn test_schema_columns_response_deserialization() {
        let json = serde_json::json!({
            "columns": [{
                "column_name": "id",
                "nullable": "NO",
                "datatype_name": "int",
                "numeric_precision": 10,
                "numeric_scale": 0
            }]
        });
        let response: SchemaColumnsResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.columns.len(), 1);
        assert_eq!(response.columns[0].column_name, "id");
        assert_eq!(response.columns[0].datatype.numeric_precision, Some(10));
    }

    #[test]
    fn test_cursor_fetch_response_defaults() {
        let json = serde_json::json!({ "rows": [[1, "a"], [2, null]] });
        let response: CursorFetchResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.rows.len(), 2);
        assert!(!response.done);
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{
            "id": "req-9",
            "success": false,
            "error": {"code": "CONNECTION_FAILED", "message": "Unable to connect"}
        }"#;
        let response: ResponseEnvelope = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.unwrap().code, "CONNECTION_FAILED");
    }
}
