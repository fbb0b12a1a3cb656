//! PostgreSQL candidate repository.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use hirevault_core::error::{AppError, ErrorKind};
use hirevault_core::result::AppResult;
use hirevault_entity::verification::CollectionKind;

use super::{CandidateRepository, CollectionMutation};

/// Candidate profiles backed by PostgreSQL.
///
/// Collection columns are interpolated from [`CollectionKind::column_name`],
/// a closed set of identifiers, never from request input.
#[derive(Debug, Clone)]
pub struct PgCandidateRepository {
    pool: PgPool,
}

impl PgCandidateRepository {
    /// Create a new candidate repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

#[async_trait]
impl CandidateRepository for PgCandidateRepository {
    async fn load_collection(
        &self,
        candidate_id: i64,
        kind: CollectionKind,
    ) -> AppResult<Option<Value>> {
        let row: Option<Option<Value>> = sqlx::query_scalar(&format!(
            "SELECT {} FROM candidates WHERE id = $1",
            kind.column_name()
        ))
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load candidate collection"))?;

        Ok(row.map(|column| column.unwrap_or(Value::Null)))
    }

    async fn mutate_collection(
        &self,
        candidate_id: i64,
        kind: CollectionKind,
        mutation: CollectionMutation<'_>,
    ) -> AppResult<()> {
        let column = kind.column_name();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Row lock held until commit or rollback.
        let row: Option<Option<Value>> = sqlx::query_scalar(&format!(
            "SELECT {column} FROM candidates WHERE id = $1 FOR UPDATE"
        ))
        .bind(candidate_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to lock candidate row"))?;

        let Some(current) = row else {
            return Err(AppError::not_found(format!(
                "Candidate {candidate_id} not found"
            )));
        };

        let Some(updated) = mutation(current.unwrap_or(Value::Null))? else {
            debug!(candidate_id, collection = %kind, "Collection unchanged, releasing lock");
            tx.rollback()
                .await
                .map_err(db_error("Failed to roll back transaction"))?;
            return Ok(());
        };

        sqlx::query(&format!("UPDATE candidates SET {column} = $1 WHERE id = $2"))
            .bind(&updated)
            .bind(candidate_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to write candidate collection"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        debug!(candidate_id, collection = %kind, "Collection written");
        Ok(())
    }
}
