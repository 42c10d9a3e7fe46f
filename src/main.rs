//! RepairDesk Server: repair-shop intake and lifecycle tracking.
//!
//! Main entry point that loads configuration, selects the storage backend,
//! and starts the HTTP server.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use repairdesk_core::config::{AppConfig, DatabaseBackend, LogFormat};
use repairdesk_core::error::AppError;
use repairdesk_database::{DatabasePool, Repositories, migration};

/// RepairDesk server
#[derive(Parser, Debug)]
#[command(name = "repairdesk-server", version, about = "RepairDesk repair-shop server")]
struct Cli {
    /// Directory holding `default.toml` and the environment overlays
    #[arg(long, env = "REPAIRDESK_CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Environment overlay to apply (`config/{env}.toml`)
    #[arg(long, env = "REPAIRDESK_ENV", default_value = "development")]
    env: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config_dir, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(
        config_dir = %cli.config_dir,
        env = %cli.env,
        "Starting RepairDesk v{}",
        env!("CARGO_PKG_VERSION")
    );

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Migrate => migrate(config).await,
    };

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), AppError> {
    let repos = match config.database.backend {
        DatabaseBackend::Postgres => {
            let db = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                migration::run_migrations(db.pool()).await?;
            }
            Repositories::postgres(db.into_pool())
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory backend; data is lost on exit");
            Repositories::memory()
        }
    };

    repairdesk_api::run_server(config, repos).await
}

async fn migrate(config: AppConfig) -> Result<(), AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        return Err(AppError::configuration(
            "Migrations require the postgres backend",
        ));
    }
    let db = DatabasePool::connect(&config.database).await?;
    migration::run_migrations(db.pool()).await?;
    db.close().await;
    Ok(())
}
