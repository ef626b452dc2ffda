//! TOML-based configuration for sqlferry.
//!
//! A transfer job is described by a config file (sqlferry.toml) with
//! environment variable expansion in credential fields:
//!
//! ```toml
//! [worker]
//! path = "./sqlferry-worker"
//! timeout_secs = 30
//! batch_rows = 500
//!
//! [source]
//! dialect = "mssql"
//! server = "db01"
//! database = "shop"
//!
//! [target]
//! dialect = "mysql"
//! server = "db02"
//! database = "shop"
//! user = "ferry"
//! password = "${SQLFERRY_TARGET_PASSWORD}"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sql::dialect::Dialect;

use super::connection::ConnectionConfig;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Missing [{0}] section in config")]
    MissingEndpoint(&'static str),

    #[error(transparent)]
    InvalidDialect(#[from] crate::sql::dialect::DialectError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Worker configuration.
    pub worker: WorkerSettings,

    /// Source endpoint.
    pub source: Option<EndpointSettings>,

    /// Target endpoint.
    pub target: Option<EndpointSettings>,
}

/// Worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// Path to the bridge worker binary.
    pub path: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Rows fetched per cursor batch during transfer.
    pub batch_rows: u32,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            path: None,
            timeout_secs: 30,
            batch_rows: 500,
        }
    }
}

impl WorkerSettings {
    /// Resolve the worker binary path: the configured one, or the
    /// first existing common location.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(PathBuf::from(path));
        }
        for candidate in ["sqlferry-worker", "./sqlferry-worker", "./worker/sqlferry-worker"] {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }
}

/// One endpoint as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointSettings {
    /// Dialect name (mssql, mysql).
    pub dialect: String,

    /// Server hostname.
    pub server: String,

    /// Database name.
    pub database: String,

    /// Port (optional).
    #[serde(default)]
    pub port: Option<u16>,

    /// Username (supports ${ENV_VAR} expansion).
    #[serde(default)]
    pub user: Option<String>,

    /// Password (supports ${ENV_VAR} expansion).
    #[serde(default)]
    pub password: Option<String>,
}

impl EndpointSettings {
    /// Resolve into a connection config, expanding environment
    /// variables in the credential fields.
    pub fn to_connection_config(&self) -> Result<ConnectionConfig, SettingsError> {
        let dialect = Dialect::parse(&self.dialect)?;
        let username = self.user.as_deref().map(expand_env_vars).transpose()?;
        let password = self.password.as_deref().map(expand_env_vars).transpose()?;
        let trusted_connection = dialect == Dialect::MsSql && username.is_none();

        Ok(ConnectionConfig {
            dialect,
            server: self.server.clone(),
            database: self.database.clone(),
            port: self.port,
            username,
            password,
            trusted_connection,
        })
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default locations: the `SQLFERRY_CONFIG`
    /// environment variable, then `./sqlferry.toml`, then defaults.
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("SQLFERRY_CONFIG") {
            return Self::from_file(&path);
        }
        let local = PathBuf::from("sqlferry.toml");
        if local.exists() {
            return Self::from_file(&local);
        }
        Ok(Settings::default())
    }

    /// The source endpoint, required for every command.
    pub fn source(&self) -> Result<&EndpointSettings, SettingsError> {
        self.source
            .as_ref()
            .ok_or(SettingsError::MissingEndpoint("source"))
    }

    /// The target endpoint, required for plan/transfer.
    pub fn target(&self) -> Result<&EndpointSettings, SettingsError> {
        self.target
            .as_ref()
            .ok_or(SettingsError::MissingEndpoint("target"))
    }
}

/// Expand `${VAR}` references in a string.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or_else(|| SettingsError::MissingEnvVar(after.to_string()))?;
        let name = &after[..end];
        let value = env::var(name).map_err(|_| SettingsError::MissingEnvVar(name.to_string()))?;
        result.push_str(&rest[..start]);
        result.push_str(&value);
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}
