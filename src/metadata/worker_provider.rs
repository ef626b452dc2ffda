//! SchemaProvider implementation backed by the bridge worker.

use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{MetadataResult, SchemaProvider};
use crate::config::ConnectionConfig;
use crate::schema::{statements, ColumnDescription, TableDescription};
use crate::sql::dialect::Dialect;
use crate::worker::protocol::ConnectionParams;
use crate::worker::WorkerClient;

/// Discovers schema by running the dialect's INFORMATION_SCHEMA
/// queries through a [`WorkerClient`].
pub struct WorkerSchemaProvider {
    client: Arc<WorkerClient>,
    dialect: Dialect,
    database: String,
    /// Cached connection parameters to avoid repeated allocations.
    connection: ConnectionParams,
}

impl WorkerSchemaProvider {
    pub fn new(client: Arc<WorkerClient>, config: &ConnectionConfig) -> Self {
        Self {
            client,
            dialect: config.dialect,
            database: config.database.clone(),
            connection: config.to_connection_params(),
        }
    }

    pub fn connection(&self) -> &ConnectionParams {
        &self.connection
    }
}

#[async_trait]
impl SchemaProvider for WorkerSchemaProvider {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn database(&self) -> &str {
        &self.database
    }

    async fn list_tables(&self) -> MetadataResult<Vec<TableDescription>> {
        let sql = statements::information_schema_tables(self.dialect, &self.database);
        let response = self.client.schema_tables(&self.connection, &sql).await?;
        Ok(response.tables)
    }

    async fn list_columns(
        &self,
        table: &str,
        schema: Option<&str>,
    ) -> MetadataResult<Vec<ColumnDescription>> {
        let sql = statements::information_schema_columns(self.dialect, &self.database, table, schema);
        let response = self.client.schema_columns(&self.connection, &sql).await?;
        Ok(response.columns)
    }
}
