//! Tables: ordered columns plus the statements that move them.
//!
//! A table is qualified differently per dialect: SQL Server names are
//! three-part (`database.schema.table`, with `dbo` as the default
//! schema), MySQL names are two-part (`database.table`, schemas are
//! databases there).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::column::{Column, ColumnDescription};
use crate::sql::datatype::DatatypeError;
use crate::sql::dialect::Dialect;

/// Error type for table-level validation.
#[derive(Debug, Error)]
pub enum TableError {
    /// Only base tables can be transferred; views and the like are
    /// skipped by the engine.
    #[error("table type must be BASE TABLE, got {0}")]
    InvalidTableType(String),
}

/// One row of a source catalog's table listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    #[serde(default)]
    pub schema: Option<String>,
    pub table: String,
    pub table_type: String,
}

/// The identity fields a table reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableParameters {
    pub table: String,
    pub table_type: String,
    pub schema: Option<String>,
}

/// An immutable table bound to a dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    dialect: Dialect,
    table: String,
    table_type: String,
    schema: Option<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, normalizing the schema for the dialect: SQL
    /// Server defaults a missing schema to `dbo`, MySQL drops it.
    pub fn new(
        dialect: Dialect,
        table: impl Into<String>,
        table_type: impl Into<String>,
        schema: Option<String>,
        columns: Vec<Column>,
    ) -> Self {
        let schema = match dialect {
            Dialect::MsSql => schema.or_else(|| Some("dbo".to_string())),
            Dialect::MySql => None,
        };
        Self {
            dialect,
            table: table.into(),
            table_type: table_type.into(),
            schema,
            columns,
        }
    }

    /// Build a table from catalog rows, running the datatype factory
    /// per column.
    pub fn from_catalog(
        dialect: Dialect,
        desc: &TableDescription,
        columns: &[ColumnDescription],
    ) -> Result<Self, DatatypeError> {
        let columns = columns
            .iter()
            .map(|column| Column::from_description(dialect, column))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(
            dialect,
            desc.table.clone(),
            desc.table_type.clone(),
            desc.schema.clone(),
            columns,
        ))
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn table_type(&self) -> &str {
        &self.table_type
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn table_parameters(&self) -> TableParameters {
        TableParameters {
            table: self.table.clone(),
            table_type: self.table_type.clone(),
            schema: self.schema.clone(),
        }
    }

    /// Whether this object can be transferred at all.
    pub fn ensure_transferable(&self) -> Result<(), TableError> {
        if self.table_type == "BASE TABLE" {
            Ok(())
        } else {
            Err(TableError::InvalidTableType(self.table_type.clone()))
        }
    }

    /// Dialect-qualified table name.
    pub fn qualified_name(&self, database: &str, alt_name: Option<&str>) -> String {
        let name = alt_name.unwrap_or(&self.table);
        match (self.dialect, &self.schema) {
            (Dialect::MsSql, Some(schema)) => format!("{}.{}.{}", database, schema, name),
            (Dialect::MsSql, None) => format!("{}.dbo.{}", database, name),
            (Dialect::MySql, _) => format!("{}.{}", database, name),
        }
    }

    /// `CREATE TABLE` statement with one clause per column.
    pub fn render_create(&self, database: &str, alt_name: Option<&str>) -> String {
        let columns = self
            .columns
            .iter()
            .map(Column::render)
            .collect::<Vec<_>>()
            .join(",\n");
        format!(
            "CREATE TABLE {} (\n\n{}\n\n);",
            self.qualified_name(database, alt_name),
            columns
        )
    }

    pub fn render_select(&self, database: &str, alt_name: Option<&str>) -> String {
        format!("SELECT * FROM {};", self.qualified_name(database, alt_name))
    }

    pub fn render_drop(&self, database: &str, alt_name: Option<&str>) -> String {
        format!(
            "DROP TABLE IF EXISTS {};",
            self.qualified_name(database, alt_name)
        )
    }

    /// Parameterized `INSERT` with one placeholder per column.
    pub fn render_insert(&self, database: &str, alt_name: Option<&str>) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| column.name().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; self.columns.len()].join(",");
        format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.qualified_name(database, alt_name),
            columns,
            placeholders
        )
    }

    /// Convert every column to the target dialect and re-tag the
    /// table. The schema is re-normalized for the target.
    pub fn convert_to(&self, target: Dialect) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|column| column.convert_to(target))
            .collect();
        Table::new(
            target,
            self.table.clone(),
            self.table_type.clone(),
            self.schema.clone(),
            columns,
        )
    }
}
