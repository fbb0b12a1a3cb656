//! Repository wiring for the configured persistence backend.

use std::sync::Arc;

use tracing::info;

use hirevault_core::config::{DatabaseConfig, DatabaseProvider};
use hirevault_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::InMemoryDatabase;
use crate::repositories::{
    CandidateRepository, PgCandidateRepository, PgSessionRepository, PgUserRepository,
    SessionRepository, UserRepository,
};

/// The repository set handed to services.
#[derive(Clone)]
pub struct Repositories {
    /// Users and role profiles.
    pub users: Arc<dyn UserRepository>,
    /// Refresh-token sessions.
    pub sessions: Arc<dyn SessionRepository>,
    /// Candidate profiles and collections.
    pub candidates: Arc<dyn CandidateRepository>,
    /// PostgreSQL pool, absent for the in-memory backend.
    pub pool: Option<DatabasePool>,
}

impl Repositories {
    /// Connect to the backend named by `config.provider`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Using in-memory repositories; data will not persist");
                Ok(Self::in_memory(InMemoryDatabase::new()))
            }
        }
    }

    /// PostgreSQL-backed repositories sharing `pool`.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pg.clone())),
            sessions: Arc::new(PgSessionRepository::new(pg.clone())),
            candidates: Arc::new(PgCandidateRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Repositories backed by one shared in-memory store.
    pub fn in_memory(db: InMemoryDatabase) -> Self {
        Self {
            users: Arc::new(db.clone()),
            sessions: Arc::new(db.clone()),
            candidates: Arc::new(db),
            pool: None,
        }
    }

    /// Whether the backend is reachable. The in-memory backend always is.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("postgres", &self.pool.is_some())
            .finish()
    }
}
