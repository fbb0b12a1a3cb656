//! Repository traits and their PostgreSQL implementations.
//!
//! Services depend on the traits only, so the same code runs against
//! PostgreSQL in production and [`crate::memory::InMemoryDatabase`] in tests.

pub mod candidate;
pub mod session;
pub mod user;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use hirevault_core::result::AppResult;
use hirevault_entity::candidate::Candidate;
use hirevault_entity::recruiter::{Recruiter, RecruiterName};
use hirevault_entity::session::{CreateSession, Session};
use hirevault_entity::user::User;
use hirevault_entity::verification::CollectionKind;

pub use candidate::PgCandidateRepository;
pub use session::PgSessionRepository;
pub use user::PgUserRepository;

/// A read-modify-write step over one stored collection column.
///
/// Receives the current column value (`Value::Null` when unset) and returns
/// `Some(new_value)` to persist or `None` to leave the row untouched. An
/// `Err` aborts the mutation without writing.
pub type CollectionMutation<'a> = &'a mut (dyn FnMut(Value) -> AppResult<Option<Value>> + Send);

/// Read access to users and their role profiles.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user whose email or username matches `login` (case-insensitive).
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// The recruiter profile owned by `user_id`.
    async fn find_recruiter_by_user(&self, user_id: i64) -> AppResult<Option<Recruiter>>;

    /// The candidate profile owned by `user_id`.
    async fn find_candidate_by_user(&self, user_id: i64) -> AppResult<Option<Candidate>>;

    /// Names of the given recruiters. Unknown ids are skipped.
    async fn find_recruiter_names(&self, ids: &[i64]) -> AppResult<Vec<RecruiterName>>;
}

/// Persistence for refresh-token sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Insert a new session row.
    async fn create(&self, data: &CreateSession) -> AppResult<Session>;

    /// Find a session by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>>;

    /// Find the session that issued `refresh_token`.
    async fn find_by_refresh_token(&self, refresh_token: &str) -> AppResult<Option<Session>>;

    /// Set `is_blocked`. Returns `false` if no such session exists.
    async fn block(&self, id: Uuid) -> AppResult<bool>;

    /// All sessions of a user, newest first.
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Session>>;
}

/// Candidate profiles and their verifiable collections.
#[async_trait]
pub trait CandidateRepository: Send + Sync + 'static {
    /// Current value of one collection column. `None` if the candidate does not exist.
    async fn load_collection(
        &self,
        candidate_id: i64,
        kind: CollectionKind,
    ) -> AppResult<Option<Value>>;

    /// Apply `mutation` to one collection column atomically.
    ///
    /// Concurrent mutations of the same candidate are serialized. Fails with
    /// `NotFound` if the candidate does not exist.
    async fn mutate_collection(
        &self,
        candidate_id: i64,
        kind: CollectionKind,
        mutation: CollectionMutation<'_>,
    ) -> AppResult<()>;
}
