//! Table transfer between two endpoints.

use std::sync::Arc;

use thiserror::Error;

use crate::config::ConnectionConfig;
use crate::metadata::{SchemaProvider, WorkerSchemaProvider};
use crate::schema::{Database, Table, TableError};
use crate::worker::protocol::ConnectionParams;
use crate::worker::{WorkerClient, WorkerError};

/// Errors raised while planning or running a transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Worker(#[from] WorkerError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("no tables matched the request: {0:?}")]
    NoTablesMatched(Vec<String>),
}

/// One endpoint: its connection config and the worker that talks to it.
#[derive(Clone)]
pub struct Endpoint {
    config: ConnectionConfig,
    client: Arc<WorkerClient>,
}

impl Endpoint {
    pub fn new(config: ConnectionConfig, client: Arc<WorkerClient>) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    fn connection(&self) -> ConnectionParams {
        self.config.to_connection_params()
    }

    fn provider(&self) -> WorkerSchemaProvider {
        WorkerSchemaProvider::new(self.client.clone(), &self.config)
    }
}

/// The statements that move one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePlan {
    /// Source table name, qualified in the source database.
    pub source_name: String,
    /// SELECT run against the source.
    pub select: String,
    /// DROP run against the target before recreating.
    pub drop: String,
    /// CREATE TABLE run against the target.
    pub create: String,
    /// Parameterized INSERT run per row against the target.
    pub insert: String,
}

/// What a finished transfer did.
#[derive(Debug, Default)]
pub struct TransferSummary {
    /// Qualified names of tables copied.
    pub transferred: Vec<String>,
    /// Qualified names of tables skipped (not BASE TABLE).
    pub skipped: Vec<String>,
    /// Total rows copied.
    pub rows: u64,
}

/// Streams tables from a source endpoint to a target endpoint.
pub struct TransferEngine {
    source: Endpoint,
    target: Endpoint,
    /// Rows per cursor batch.
    batch_rows: u32,
}

impl TransferEngine {
    pub fn new(source: Endpoint, target: Endpoint, batch_rows: u32) -> Self {
        Self {
            source,
            target,
            batch_rows: batch_rows.max(1),
        }
    }

    /// Discover the source database's shape.
    pub async fn discover_source(&self) -> Result<Database, TransferError> {
        Ok(self.source.provider().discover().await?)
    }

    /// Render the statements for one table without executing anything.
    pub fn plan_table(&self, source_db: &Database, table: &Table) -> TablePlan {
        let target_db = &self.target.config.database;
        let converted = table.convert_to(self.target.config.dialect);
        TablePlan {
            source_name: table.qualified_name(source_db.name(), None),
            select: table.render_select(source_db.name(), None),
            drop: converted.render_drop(target_db, None),
            create: converted.render_create(target_db, None),
            insert: converted.render_insert(target_db, None),
        }
    }

    /// Plan every requested table. Fails when nothing matches, so a
    /// typo does not silently plan an empty transfer.
    pub async fn plan(&self, tables: &[String]) -> Result<Vec<TablePlan>, TransferError> {
        let source_db = self.discover_source().await?;
        let selected = source_db.select_tables(tables);
        if selected.is_empty() {
            return Err(TransferError::NoTablesMatched(tables.to_vec()));
        }
        Ok(selected
            .into_iter()
            .map(|table| self.plan_table(&source_db, table))
            .collect())
    }

    /// Transfer the requested tables.
    ///
    /// Non-base tables are skipped with a warning instead of aborting
    /// the run; everything else is copied in order.
    pub async fn run(&self, tables: &[String]) -> Result<TransferSummary, TransferError> {
        let source_db = self.discover_source().await?;
        let selected = source_db.select_tables(tables);
        if selected.is_empty() {
            return Err(TransferError::NoTablesMatched(tables.to_vec()));
        }

        let mut summary = TransferSummary::default();
        for table in selected {
            let name = table.qualified_name(source_db.name(), None);
            if let Err(err) = table.ensure_transferable() {
                log::warn!("skipping {}: {}", name, err);
                summary.skipped.push(name);
                continue;
            }

            let plan = self.plan_table(&source_db, table);
            let rows = self.transfer_table(&plan).await?;
            log::info!("transferred {} ({} rows)", name, rows);
            summary.rows += rows;
            summary.transferred.push(name);
        }
        Ok(summary)
    }

    /// Recreate one table on the target and stream its rows across.
    async fn transfer_table(&self, plan: &TablePlan) -> Result<u64, TransferError> {
        let target_conn = self.target.connection();
        self.target.client.execute(&target_conn, &plan.drop, None).await?;
        self.target.client.execute(&target_conn, &plan.create, None).await?;

        let source_conn = self.source.connection();
        let cursor = self.source.client.cursor_open(&source_conn, &plan.select).await?;

        // The cursor must be released on the error path too.
        let copied = self.copy_rows(&cursor.cursor_id, &target_conn, &plan.insert).await;
        let closed = self.source.client.cursor_close(&cursor.cursor_id).await;
        let rows = copied?;
        closed?;
        Ok(rows)
    }

    async fn copy_rows(
        &self,
        cursor_id: &str,
        target_conn: &ConnectionParams,
        insert: &str,
    ) -> Result<u64, TransferError> {
        let mut rows = 0u64;
        loop {
            let batch = self.source.client.cursor_fetch(cursor_id, self.batch_rows).await?;
            for row in batch.rows {
                self.target
                    .client
                    .execute(target_conn, insert, Some(row))
                    .await?;
                rows += 1;
            }
            if batch.done {
                return Ok(rows);
            }
        }
    }
}
