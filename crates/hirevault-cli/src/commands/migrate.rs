//! Database migration command.

use hirevault_core::config::AppConfig;
use hirevault_core::error::AppError;

use crate::output;

/// Apply every pending migration in `migrations/`.
pub async fn execute(config: AppConfig) -> Result<(), AppError> {
    let repositories = super::open_repositories(&config).await?;

    let Some(pool) = repositories.pool.as_ref() else {
        output::print_warning("In-memory backend configured; nothing to migrate.");
        return Ok(());
    };

    println!("Running database migrations...");
    hirevault_database::migration::run_migrations(pool.pool()).await?;
    pool.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
