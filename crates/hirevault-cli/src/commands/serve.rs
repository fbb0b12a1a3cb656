//! Start the HireVault API server.

use clap::Args;

use hirevault_core::config::AppConfig;
use hirevault_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip running database migrations on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting HireVault server...");
    println!("  Address: {}", config.server.bind_address());
    println!("  Backend: {:?}", config.database.provider);

    let repositories = super::open_repositories(&config).await?;

    if let Some(pool) = repositories.pool.as_ref() {
        if !args.skip_migrations {
            println!("Running database migrations...");
            hirevault_database::migration::run_migrations(pool.pool()).await?;
            println!("  Migrations applied successfully.");
        }
    }

    hirevault_api::app::run_server(config, repositories).await
}
