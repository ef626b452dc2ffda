//! SQL dialect tag.
//!
//! A [`Dialect`] identifies one of the two supported SQL systems and
//! carries the metadata the rest of the crate keys on:
//!
//! - `id()` selects the datatype factory and table flavor
//! - `id_lower()` keys into the character-set and datatype-name catalogs
//! - `driver()` is the ODBC driver string handed to the bridge worker
//!
//! A constructed `Dialect` is always valid; the only failure mode is
//! parsing user input, which returns [`DialectError::InvalidDialect`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for dialect selection.
#[derive(Debug, Error)]
pub enum DialectError {
    #[error("not a valid SQL dialect: {0}. Supported: mssql, mysql")]
    InvalidDialect(String),
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Microsoft SQL Server (T-SQL).
    MsSql,
    /// MySQL.
    MySql,
}

impl Dialect {
    /// Exact-case system id, used to select factories and table flavors.
    pub fn id(&self) -> &'static str {
        match self {
            Dialect::MsSql => "MsSQL",
            Dialect::MySql => "MySQL",
        }
    }

    /// Lowercase id, the key into the character-set and datatype catalogs.
    pub fn id_lower(&self) -> &'static str {
        match self {
            Dialect::MsSql => "mssql",
            Dialect::MySql => "mysql",
        }
    }

    /// Human-readable system name.
    pub fn display(&self) -> &'static str {
        match self {
            Dialect::MsSql => "Microsoft SQL Server",
            Dialect::MySql => "MySQL",
        }
    }

    /// ODBC driver string for the external connector.
    pub fn driver(&self) -> &'static str {
        match self {
            Dialect::MsSql => "{ODBC Driver 17 for SQL Server}",
            Dialect::MySql => "{MySQL ODBC 8.0 Unicode Driver}",
        }
    }

    /// Parse a dialect from user input.
    ///
    /// Accepts the common spellings (`mssql`, `sqlserver`, `tsql`,
    /// `mysql`, …) case-insensitively.
    pub fn parse(s: &str) -> Result<Self, DialectError> {
        match s.to_lowercase().as_str() {
            "mssql" | "sqlserver" | "sql_server" | "tsql" => Ok(Dialect::MsSql),
            "mysql" => Ok(Dialect::MySql),
            other => Err(DialectError::InvalidDialect(other.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
