//! Schema objects: columns, tables, and the discovered database.
//!
//! These are the external-facing wrappers around the datatype
//! algebra: a [`Column`] owns exactly one datatype, a [`Table`] owns
//! an ordered sequence of columns, and a [`Database`] is what schema
//! discovery produces. All of them are immutable after construction;
//! converting to the other dialect produces new values.

pub mod column;
pub mod database;
pub mod statements;
pub mod table;

pub use column::{Column, ColumnDescription, ColumnParameters, Nullable};
pub use database::Database;
pub use table::{Table, TableDescription, TableError, TableParameters};
