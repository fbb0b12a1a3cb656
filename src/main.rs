//! HireVault Server: recruiter credentials and candidate verification.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use hirevault_core::config::{AppConfig, DatabaseProvider};
use hirevault_core::error::AppError;
use hirevault_database::Repositories;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `HIREVAULT_ENV` overlay, and environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("HIREVAULT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("HIREVAULT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        provider = ?config.database.provider,
        "Connecting to database..."
    );
    let repositories = Repositories::connect(&config.database).await?;

    if config.database.provider == DatabaseProvider::Postgres {
        if let Some(pool) = repositories.pool.as_ref() {
            tracing::info!("Running database migrations...");
            hirevault_database::migration::run_migrations(pool.pool()).await?;
            tracing::info!("Database migrations complete");
        }
    }

    hirevault_api::app::run_server(config, repositories).await
}
