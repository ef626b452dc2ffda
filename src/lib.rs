//! # sqlferry
//!
//! Transfers table data between Microsoft SQL Server and MySQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │             Source catalog (INFORMATION_SCHEMA)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata::SchemaProvider]
//! ┌─────────────────────────────────────────────────────────┐
//! │     schema::Database (typed tables and columns)         │
//! │     built by the sql::datatype factory per column       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [Datatype::convert_to]
//! ┌─────────────────────────────────────────────────────────┐
//! │       Same tables, re-typed for the target dialect      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [transfer::TransferEngine]
//! ┌─────────────────────────────────────────────────────────┐
//! │   DROP / CREATE on the target, rows streamed across     │
//! │   through the bridge worker (one cursor per transfer)   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The `sql` module is the purely functional core: the dialect tag,
//! the character-set and datatype-name catalogs, and the typed
//! datatype algebra with its dialect-to-dialect conversion. All
//! database I/O lives behind the `worker` bridge process.

pub mod config;
pub mod metadata;
pub mod schema;
pub mod sql;
pub mod transfer;
pub mod worker;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::schema::{Column, ColumnDescription, Database, Nullable, Table};
    pub use crate::sql::{
        CharsetCatalog, Datatype, DatatypeCatalog, DatatypeError, Dialect, RawColumnType,
        TypeParameters,
    };
    pub use crate::transfer::{TransferEngine, TransferSummary};
}

// Also export the workhorse types at the crate root.
pub use schema::{Column, Database, Table};
pub use sql::{Datatype, Dialect, RawColumnType};
