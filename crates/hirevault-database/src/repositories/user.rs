//! PostgreSQL user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use hirevault_core::error::{AppError, ErrorKind};
use hirevault_core::result::AppResult;
use hirevault_entity::candidate::Candidate;
use hirevault_entity::recruiter::{Recruiter, RecruiterName};
use hirevault_entity::user::User;

use super::UserRepository;

const USER_COLUMNS: &str = "id, username, email, password_hash, account_type, created_at";

const CANDIDATE_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone_number, \
     job_title, years_of_experience, status, created_at";

/// Users, recruiters and candidate profiles backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE LOWER(email) = LOWER($1) OR LOWER(username) = LOWER($1) \
             ORDER BY id LIMIT 1"
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by login", e))
    }

    async fn find_recruiter_by_user(&self, user_id: i64) -> AppResult<Option<Recruiter>> {
        sqlx::query_as::<_, Recruiter>(
            "SELECT id, user_id, first_name, last_name FROM recruiters WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find recruiter profile", e)
        })
    }

    async fn find_candidate_by_user(&self, user_id: i64) -> AppResult<Option<Candidate>> {
        sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find candidate profile", e)
        })
    }

    async fn find_recruiter_names(&self, ids: &[i64]) -> AppResult<Vec<RecruiterName>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, RecruiterName>(
            "SELECT id, first_name, last_name FROM recruiters WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load recruiter names", e))
    }
}
