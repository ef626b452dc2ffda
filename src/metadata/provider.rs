//! SchemaProvider trait definition.
//!
//! The SchemaProvider trait abstracts over how a database's shape is
//! discovered. The primary implementation runs the per-dialect
//! INFORMATION_SCHEMA queries through the bridge worker.

use async_trait::async_trait;

use crate::schema::{ColumnDescription, Database, Table, TableDescription};
use crate::sql::dialect::Dialect;
use crate::worker::WorkerError;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, WorkerError>;

/// Trait for discovering a database's tables and columns.
///
/// Implementations provide the raw catalog rows; `discover` assembles
/// them into the typed [`Database`] the transfer engine consumes.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Dialect of the endpoint behind this provider.
    fn dialect(&self) -> Dialect;

    /// Database name at the endpoint.
    fn database(&self) -> &str;

    /// List every table in the database.
    async fn list_tables(&self) -> MetadataResult<Vec<TableDescription>>;

    /// List one table's columns, in ordinal order.
    async fn list_columns(
        &self,
        table: &str,
        schema: Option<&str>,
    ) -> MetadataResult<Vec<ColumnDescription>>;

    /// Discover the whole database.
    ///
    /// Column listings are fetched in parallel. Tables containing a
    /// datatype the factory does not recognize are logged and skipped
    /// rather than failing discovery; one exotic table should not
    /// block transferring the rest.
    async fn discover(&self) -> MetadataResult<Database> {
        let descriptions = self.list_tables().await?;

        let futures: Vec<_> = descriptions
            .iter()
            .map(|desc| self.list_columns(&desc.table, desc.schema.as_deref()))
            .collect();
        let results = futures::future::join_all(futures).await;

        let mut tables = Vec::with_capacity(descriptions.len());
        for (desc, columns) in descriptions.iter().zip(results) {
            match Table::from_catalog(self.dialect(), desc, &columns?) {
                Ok(table) => tables.push(table),
                Err(err) => {
                    log::warn!("skipping table {}: {}", desc.table, err);
                }
            }
        }

        log::info!(
            "discovered {} of {} tables in {}",
            tables.len(),
            descriptions.len(),
            self.database()
        );
        Ok(Database::new(self.dialect(), self.database(), tables))
    }
}
