//! PostgreSQL session repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hirevault_core::error::{AppError, ErrorKind};
use hirevault_core::result::AppResult;
use hirevault_entity::session::{CreateSession, Session};

use super::SessionRepository;

/// Refresh-token sessions backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions \
             (id, refresh_token, user_agent, client_ip, is_blocked, expires_at, created_at, user_id) \
             VALUES ($1, $2, $3, $4, FALSE, $5, $6, $7) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.refresh_token)
        .bind(&data.user_agent)
        .bind(&data.client_ip)
        .bind(data.expires_at)
        .bind(data.created_at)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found(format!("User {} not found", data.user_id));
                }
            }
            AppError::with_source(ErrorKind::Database, "Failed to create session", e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE refresh_token = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to find session by refresh token",
                e,
            )
        })
    }

    async fn block(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("UPDATE sessions SET is_blocked = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to block session", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sessions", e))
    }
}
