//! Database bridge worker communication.
//!
//! All database I/O happens in a separate bridge worker process that
//! owns the ODBC connections; the crate itself never links a database
//! driver. Communication is NDJSON over stdin/stdout:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 sqlferry (Rust + Tokio)                   │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │                 WorkerClient (async)                │  │
//! │  │  - spawns the worker as a child process             │  │
//! │  │  - request IDs correlate concurrent requests        │  │
//! │  │  - schema.* / sql.execute / cursor.* methods        │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! │                 stdin (NDJSON) │ stdout (NDJSON)          │
//! └────────────────────────────────┼──────────────────────────┘
//!                                  ▼
//!                 bridge worker (child process, ODBC)
//! ```

mod client;
mod error;
pub mod protocol;

pub use client::WorkerClient;
pub use error::{WorkerError, WorkerResult};
