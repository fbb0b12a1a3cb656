//! CLI command definitions and dispatch.

pub mod hash_password;
pub mod migrate;
pub mod serve;
pub mod session;

use clap::{Parser, Subcommand};

use hirevault_core::config::AppConfig;
use hirevault_core::error::AppError;
use hirevault_database::Repositories;

use crate::output::OutputFormat;

/// HireVault: recruiter credentials and candidate verification
#[derive(Debug, Parser)]
#[command(name = "hirevault", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (config/{env}.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HireVault API server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// Inspect and block refresh-token sessions
    Session(session::SessionArgs),
    /// Produce an Argon2 hash for a password
    HashPassword(hash_password::HashPasswordArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self.load_config()?).await,
            Commands::Migrate => migrate::execute(self.load_config()?).await,
            Commands::Session(args) => {
                session::execute(args, self.load_config()?, self.format).await
            }
            Commands::HashPassword(args) => hash_password::execute(args),
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config_dir, &self.env)
    }
}

/// Helper: open the repositories named by the configuration
pub async fn open_repositories(config: &AppConfig) -> Result<Repositories, AppError> {
    Repositories::connect(&config.database).await
}
