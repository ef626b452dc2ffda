//! The transfer engine: drop, recreate, and stream.
//!
//! For every requested base table the engine renders four statements
//! (source SELECT, target DROP/CREATE/INSERT), then streams rows
//! source-cursor → target-insert in bounded batches. The engine holds
//! one cursor per transfer at a time and closes it on success and
//! error paths alike.

mod engine;

pub use engine::{Endpoint, TablePlan, TransferEngine, TransferError, TransferSummary};
