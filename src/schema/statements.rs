//! INFORMATION_SCHEMA query text, per dialect.
//!
//! SQL Server scopes the catalog views by three-part name and filters
//! on TABLE_SCHEMA; MySQL has no schema level below the database, so
//! it filters TABLE_SCHEMA by the database name instead and reports
//! an empty schema column to keep the row shape uniform.

use crate::sql::dialect::Dialect;

/// List every table in the database: schema, name, type.
pub fn information_schema_tables(dialect: Dialect, database: &str) -> String {
    match dialect {
        Dialect::MsSql => format!(
            "SELECT TABLE_SCHEMA, TABLE_NAME, TABLE_TYPE \
             FROM {database}.INFORMATION_SCHEMA.TABLES;"
        ),
        Dialect::MySql => format!(
            "SELECT '', TABLE_NAME, TABLE_TYPE \
             FROM INFORMATION_SCHEMA.TABLES \
             WHERE TABLE_SCHEMA = '{database}';"
        ),
    }
}

/// List one table's columns in ordinal order, with the raw type
/// parameters the datatype factory consumes.
pub fn information_schema_columns(
    dialect: Dialect,
    database: &str,
    table: &str,
    schema: Option<&str>,
) -> String {
    const COLUMNS: &str = "COLUMN_NAME, IS_NULLABLE, DATA_TYPE, CHARACTER_MAXIMUM_LENGTH, \
                           CHARACTER_SET_NAME, NUMERIC_PRECISION, NUMERIC_SCALE, DATETIME_PRECISION";
    match dialect {
        Dialect::MsSql => {
            let schema = schema.unwrap_or("dbo");
            format!(
                "SELECT {COLUMNS} \
                 FROM {database}.INFORMATION_SCHEMA.COLUMNS \
                 WHERE TABLE_SCHEMA = '{schema}' AND TABLE_NAME = '{table}' \
                 ORDER BY ORDINAL_POSITION;"
            )
        }
        Dialect::MySql => format!(
            "SELECT {COLUMNS} \
             FROM INFORMATION_SCHEMA.COLUMNS \
             WHERE TABLE_SCHEMA = '{database}' AND TABLE_NAME = '{table}' \
             ORDER BY ORDINAL_POSITION;"
        ),
    }
}

/// Count matching tables, for existence probes.
pub fn table_exists(
    dialect: Dialect,
    database: &str,
    table: &str,
    table_type: &str,
    _schema: Option<&str>,
) -> String {
    match dialect {
        Dialect::MsSql => format!(
            "SELECT count(*) as Cnt \
             FROM {database}.INFORMATION_SCHEMA.TABLES \
             WHERE TABLE_NAME = '{table}' AND TABLE_TYPE = '{table_type}';"
        ),
        Dialect::MySql => format!(
            "SELECT count(*) as Cnt \
             FROM INFORMATION_SCHEMA.TABLES \
             WHERE TABLE_SCHEMA = '{database}' AND TABLE_NAME = '{table}' \
             AND TABLE_TYPE = '{table_type}';"
        ),
    }
}
