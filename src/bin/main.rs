//! sqlferry CLI - transfer tables between SQL Server and MySQL
//!
//! Usage:
//!   sqlferry tables
//!   sqlferry columns <table> [--convert]
//!   sqlferry plan <qualified-table>...
//!   sqlferry transfer <qualified-table>...
//!
//! Endpoints come from sqlferry.toml (or SQLFERRY_CONFIG); `tables`
//! prints the qualified names the other commands take.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use sqlferry::config::{Settings, SettingsError};
use sqlferry::metadata::{SchemaProvider, WorkerSchemaProvider};
use sqlferry::transfer::{Endpoint, TransferEngine};
use sqlferry::worker::WorkerClient;

#[derive(Parser)]
#[command(name = "sqlferry")]
#[command(about = "sqlferry - transfer tables between SQL Server and MySQL")]
#[command(version)]
struct Cli {
    /// Path to the config file (default: ./sqlferry.toml or SQLFERRY_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the source database's tables
    Tables,

    /// Show a source table's columns and their rendered types
    Columns {
        /// Table name (unqualified)
        table: String,

        /// Also show each column as the target dialect would create it
        #[arg(short = 'v', long)]
        convert: bool,
    },

    /// Print the statements a transfer would run, without executing
    Plan {
        /// Qualified table names (as printed by `sqlferry tables`)
        tables: Vec<String>,
    },

    /// Recreate the tables on the target and stream their rows across
    Transfer {
        /// Qualified table names (as printed by `sqlferry tables`)
        tables: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Tables => cmd_tables(&settings).await,
        Commands::Columns { table, convert } => cmd_columns(&settings, &table, convert).await,
        Commands::Plan { tables } => cmd_plan(&settings, &tables).await,
        Commands::Transfer { tables } => cmd_transfer(&settings, &tables).await,
    }
}

fn load_settings(path: Option<&std::path::Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

/// Spawn the bridge worker configured in settings.
async fn spawn_worker(settings: &Settings) -> Result<Arc<WorkerClient>, String> {
    let path = settings
        .worker
        .resolved_path()
        .ok_or_else(|| "worker binary not found; set worker.path in sqlferry.toml".to_string())?;
    let timeout = Duration::from_secs(settings.worker.timeout_secs);
    let client = WorkerClient::spawn_with_timeout(&path, timeout)
        .await
        .map_err(|e| e.to_string())?;
    Ok(Arc::new(client))
}

/// Build the source provider shared by the read-only commands.
async fn source_provider(settings: &Settings) -> Result<WorkerSchemaProvider, String> {
    let config = settings
        .source()
        .and_then(|endpoint| endpoint.to_connection_config())
        .map_err(|e| e.to_string())?;
    let client = spawn_worker(settings).await?;
    Ok(WorkerSchemaProvider::new(client, &config))
}

async fn cmd_tables(settings: &Settings) -> ExitCode {
    let provider = match source_provider(settings).await {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match provider.discover().await {
        Ok(database) => {
            for table in database.tables() {
                println!(
                    "{}\t{}",
                    table.qualified_name(database.name(), None),
                    table.table_type()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error discovering schema: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_columns(settings: &Settings, table_name: &str, convert: bool) -> ExitCode {
    let target_dialect = if convert {
        match settings.target().and_then(|t| t.to_connection_config()) {
            Ok(config) => Some(config.dialect),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        None
    };

    let provider = match source_provider(settings).await {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let database = match provider.discover().await {
        Ok(database) => database,
        Err(e) => {
            eprintln!("Error discovering schema: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(table) = database.tables().iter().find(|t| t.table() == table_name) else {
        eprintln!("Table '{}' not found in {}", table_name, database.name());
        return ExitCode::FAILURE;
    };

    for column in table.columns() {
        match target_dialect {
            Some(dialect) => {
                println!("{}\t-> {}", column.render(), column.convert_to(dialect).render())
            }
            None => println!("{}", column.render()),
        }
    }
    ExitCode::SUCCESS
}

async fn build_engine(settings: &Settings) -> Result<TransferEngine, String> {
    let source = settings
        .source()
        .and_then(|endpoint| endpoint.to_connection_config())
        .map_err(|e| e.to_string())?;
    let target = settings
        .target()
        .and_then(|endpoint| endpoint.to_connection_config())
        .map_err(|e| e.to_string())?;

    // One worker serves both endpoints; it keys connections by the
    // connection parameters in each request.
    let client = spawn_worker(settings).await?;
    Ok(TransferEngine::new(
        Endpoint::new(source, client.clone()),
        Endpoint::new(target, client),
        settings.worker.batch_rows,
    ))
}

async fn cmd_plan(settings: &Settings, tables: &[String]) -> ExitCode {
    if tables.is_empty() {
        eprintln!("No tables given. Run `sqlferry tables` for the available names.");
        return ExitCode::FAILURE;
    }

    let engine = match build_engine(settings).await {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match engine.plan(tables).await {
        Ok(plans) => {
            for plan in plans {
                println!("-- {}", plan.source_name);
                println!("{}", plan.drop);
                println!("{}", plan.create);
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error planning transfer: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_transfer(settings: &Settings, tables: &[String]) -> ExitCode {
    if tables.is_empty() {
        eprintln!("No tables given. Run `sqlferry tables` for the available names.");
        return ExitCode::FAILURE;
    }

    let engine = match build_engine(settings).await {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match engine.run(tables).await {
        Ok(summary) => {
            println!(
                "Transferred {} table(s), {} row(s)",
                summary.transferred.len(),
                summary.rows
            );
            for name in &summary.skipped {
                println!("Skipped {} (not a base table)", name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error during transfer: {}", e);
            ExitCode::FAILURE
        }
    }
}
