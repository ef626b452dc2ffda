//! Configuration module for sqlferry.
//!
//! Handles endpoint connection configuration, environment variables,
//! and the TOML job file.

mod connection;
mod settings;

pub use connection::{ConnectionConfig, ConnectionError};
pub use settings::{
    expand_env_vars, EndpointSettings, Settings, SettingsError, WorkerSettings,
};
