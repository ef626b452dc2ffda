//! Endpoint connection configuration.
//!
//! Each transfer has two endpoints (source and target), configurable
//! via environment variables:
//! - `SQLFERRY_<SIDE>_DIALECT`: mssql or mysql
//! - `SQLFERRY_<SIDE>_SERVER`: server hostname
//! - `SQLFERRY_<SIDE>_DATABASE`: database name
//! - `SQLFERRY_<SIDE>_PORT`: port (optional, dialect default)
//! - `SQLFERRY_<SIDE>_USER` / `SQLFERRY_<SIDE>_PASSWORD`: credentials
//!
//! where `<SIDE>` is `SOURCE` or `TARGET`. SQL Server endpoints with
//! no credentials fall back to a trusted connection.

use std::env;

use crate::sql::dialect::{Dialect, DialectError};
use crate::worker::protocol::ConnectionParams;

/// Error type for connection configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error(transparent)]
    InvalidDialect(#[from] DialectError),
}

/// Connection configuration for one endpoint.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// SQL dialect of the endpoint.
    pub dialect: Dialect,
    /// Server hostname.
    pub server: String,
    /// Database name.
    pub database: String,
    /// Port (optional, dialect default when absent).
    pub port: Option<u16>,
    /// Username (if not using a trusted connection).
    pub username: Option<String>,
    /// Password (if not using a trusted connection).
    pub password: Option<String>,
    /// Use a trusted connection (SQL Server only).
    pub trusted_connection: bool,
}

impl ConnectionConfig {
    /// Config for SQL Server with a trusted connection.
    pub fn mssql_trusted(server: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            dialect: Dialect::MsSql,
            server: server.into(),
            database: database.into(),
            port: None,
            username: None,
            password: None,
            trusted_connection: true,
        }
    }

    /// Config for MySQL with username/password credentials.
    pub fn mysql(
        server: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            dialect: Dialect::MySql,
            server: server.into(),
            database: database.into(),
            port: None,
            username: Some(username.into()),
            password: Some(password.into()),
            trusted_connection: false,
        }
    }

    /// Load one endpoint's configuration from environment variables.
    ///
    /// `side` is `"SOURCE"` or `"TARGET"`.
    pub fn from_env(side: &str) -> Result<Self, ConnectionError> {
        let var = |suffix: &str| format!("SQLFERRY_{}_{}", side, suffix);
        let require = |suffix: &str| {
            env::var(var(suffix)).map_err(|_| ConnectionError::MissingEnvVar(var(suffix)))
        };

        let dialect = Dialect::parse(&require("DIALECT")?)?;
        let server = require("SERVER")?;
        let database = require("DATABASE")?;
        let port = env::var(var("PORT")).ok().and_then(|p| p.parse().ok());
        let username = env::var(var("USER")).ok();
        let password = env::var(var("PASSWORD")).ok();

        // Trusted connection when no credentials given (SQL Server only).
        let trusted_connection = dialect == Dialect::MsSql && username.is_none();

        Ok(Self {
            dialect,
            server,
            database,
            port,
            username,
            password,
            trusted_connection,
        })
    }

    /// Default port for the dialect.
    pub fn default_port(&self) -> u16 {
        match self.dialect {
            Dialect::MsSql => 1433,
            Dialect::MySql => 3306,
        }
    }

    /// Build the ODBC connection string for the bridge worker.
    pub fn to_connection_string(&self) -> String {
        let mut parts = vec![format!("DRIVER={}", self.dialect.driver())];

        match (self.dialect, self.port) {
            // SQL Server spells the port with a comma.
            (Dialect::MsSql, Some(port)) => parts.push(format!("SERVER={},{}", self.server, port)),
            (Dialect::MsSql, None) => parts.push(format!("SERVER={}", self.server)),
            (Dialect::MySql, port) => {
                parts.push(format!("SERVER={}", self.server));
                parts.push(format!("PORT={}", port.unwrap_or(3306)));
            }
        }

        parts.push(format!("DATABASE={}", self.database));

        if self.trusted_connection {
            parts.push("Trusted_Connection=yes".to_string());
        } else {
            if let Some(user) = &self.username {
                parts.push(format!("UID={}", user));
            }
            if let Some(password) = &self.password {
                parts.push(format!("PWD={}", password));
            }
        }

        parts.join(";") + ";"
    }

    /// The worker-protocol connection parameters for this endpoint.
    pub fn to_connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            driver: self.dialect.driver().to_string(),
            connection_string: self.to_connection_string(),
        }
    }
}
