//! Database migration runner.
//!
//! Migrations are embedded at compile time from the workspace `migrations/`
//! directory.

use sqlx::PgPool;
use tracing::info;

use hirevault_core::error::{AppError, ErrorKind};

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying pending migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Migrations applied");
    Ok(())
}
