//! Schema discovery.
//!
//! A [`SchemaProvider`] turns an endpoint's catalog into the typed
//! [`crate::schema::Database`] the transfer engine works from:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     SchemaProvider                       │
//! │   list_tables() ──► TableDescription rows                │
//! │   list_columns() ─► ColumnDescription rows               │
//! │   discover() ─────► Database (typed, factory-validated)  │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//!                      WorkerClient
//!                 (NDJSON over stdin/stdout)
//! ```

mod provider;
mod worker_provider;

pub use provider::{MetadataResult, SchemaProvider};
pub use worker_provider::WorkerSchemaProvider;
