//! Session persistence wrapper.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use hirevault_core::error::AppError;
use hirevault_core::traits::Clock;
use hirevault_database::repositories::SessionRepository;
use hirevault_entity::session::{CreateSession, Session};

/// Store-backed half of the two-tier token check: one row per login.
#[derive(Clone)]
pub struct SessionStore {
    repo: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("clock", &self.clock)
            .finish()
    }
}

impl SessionStore {
    /// Create a new session store.
    pub fn new(repo: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Record a login. The session starts unblocked.
    pub async fn create(
        &self,
        user_id: i64,
        refresh_token: &str,
        user_agent: &str,
        client_ip: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        self.repo
            .create(&CreateSession {
                user_id,
                refresh_token: refresh_token.to_string(),
                user_agent: user_agent.to_string(),
                client_ip: client_ip.to_string(),
                expires_at,
                created_at: self.clock.now(),
            })
            .await
    }

    /// A session by id.
    pub async fn find_by_id(&self, session_id: Uuid) -> Result<Option<Session>, AppError> {
        self.repo.find_by_id(session_id).await
    }

    /// The session that issued `refresh_token`, if any.
    pub async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Session>, AppError> {
        self.repo.find_by_refresh_token(refresh_token).await
    }

    /// Exists, is not blocked, and `now <= expires_at`.
    pub fn is_usable(&self, session: Option<&Session>) -> bool {
        session.is_some_and(|s| s.is_usable_at(self.clock.now()))
    }

    /// Block a session by id. Blocking twice succeeds.
    pub async fn block(&self, session_id: Uuid) -> Result<(), AppError> {
        if !self.repo.block(session_id).await? {
            return Err(AppError::not_found(format!("Session {session_id} not found")));
        }
        info!(session_id = %session_id, "Session blocked");
        Ok(())
    }

    /// Block the session that issued `refresh_token`. Returns `None` if there is none.
    pub async fn block_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Session>, AppError> {
        let Some(mut session) = self.repo.find_by_refresh_token(refresh_token).await? else {
            return Ok(None);
        };
        self.block(session.id).await?;
        session.is_blocked = true;
        Ok(Some(session))
    }

    /// Every session of a user, newest first.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Session>, AppError> {
        self.repo.list_for_user(user_id).await
    }
}
