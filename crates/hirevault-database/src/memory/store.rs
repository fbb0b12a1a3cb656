use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use hirevault_core::error::AppError;
use hirevault_core::result::AppResult;
use hirevault_entity::candidate::Candidate;
use hirevault_entity::recruiter::{Recruiter, RecruiterName};
use hirevault_entity::session::{CreateSession, Session};
use hirevault_entity::user::User;
use hirevault_entity::verification::CollectionKind;

use crate::repositories::{
    CandidateRepository, CollectionMutation, SessionRepository, UserRepository,
};

#[derive(Debug)]
struct StoredCandidate {
    profile: Candidate,
    collections: HashMap<CollectionKind, Value>,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<i64, User>,
    recruiters: HashMap<i64, Recruiter>,
    candidates: HashMap<i64, StoredCandidate>,
    sessions: HashMap<Uuid, Session>,
}

/// Process-local stand-in for the PostgreSQL repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<State>>,
}

impl InMemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub async fn insert_user(&self, user: User) {
        self.state.lock().await.users.insert(user.id, user);
    }

    /// Insert or replace a recruiter profile.
    pub async fn insert_recruiter(&self, recruiter: Recruiter) {
        self.state
            .lock()
            .await
            .recruiters
            .insert(recruiter.id, recruiter);
    }

    /// Insert or replace a candidate profile. Existing collections are kept.
    pub async fn insert_candidate(&self, candidate: Candidate) {
        let mut state = self.state.lock().await;
        match state.candidates.get_mut(&candidate.id) {
            Some(stored) => stored.profile = candidate,
            None => {
                state.candidates.insert(
                    candidate.id,
                    StoredCandidate {
                        profile: candidate,
                        collections: HashMap::new(),
                    },
                );
            }
        }
    }

    /// Overwrite one collection column of an existing candidate.
    pub async fn set_collection(
        &self,
        candidate_id: i64,
        kind: CollectionKind,
        value: Value,
    ) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let stored = state
            .candidates
            .get_mut(&candidate_id)
            .ok_or_else(|| AppError::not_found(format!("Candidate {candidate_id} not found")))?;
        stored.collections.insert(kind, value);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        let mut matches: Vec<&User> = state
            .users
            .values()
            .filter(|u| u.email.eq_ignore_ascii_case(login) || u.username.eq_ignore_ascii_case(login))
            .collect();
        matches.sort_by_key(|u| u.id);
        Ok(matches.first().map(|u| (*u).clone()))
    }

    async fn find_recruiter_by_user(&self, user_id: i64) -> AppResult<Option<Recruiter>> {
        let state = self.state.lock().await;
        Ok(state
            .recruiters
            .values()
            .find(|r| r.user_id == user_id)
            .cloned())
    }

    async fn find_candidate_by_user(&self, user_id: i64) -> AppResult<Option<Candidate>> {
        let state = self.state.lock().await;
        Ok(state
            .candidates
            .values()
            .find(|c| c.profile.is_owned_by(user_id))
            .map(|c| c.profile.clone()))
    }

    async fn find_recruiter_names(&self, ids: &[i64]) -> AppResult<Vec<RecruiterName>> {
        let state = self.state.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.recruiters.get(id))
            .map(RecruiterName::from)
            .collect())
    }
}

#[async_trait]
impl SessionRepository for InMemoryDatabase {
    async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&data.user_id) {
            return Err(AppError::not_found(format!("User {} not found", data.user_id)));
        }
        let session = Session {
            id: Uuid::new_v4(),
            refresh_token: data.refresh_token.clone(),
            user_agent: data.user_agent.clone(),
            client_ip: data.client_ip.clone(),
            is_blocked: false,
            expires_at: data.expires_at,
            created_at: data.created_at,
            user_id: data.user_id,
        };
        state.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        Ok(self.state.lock().await.sessions.get(&id).cloned())
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> AppResult<Option<Session>> {
        let state = self.state.lock().await;
        Ok(state
            .sessions
            .values()
            .filter(|s| s.refresh_token == refresh_token)
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    async fn block(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.sessions.get_mut(&id) {
            Some(session) => {
                session.is_blocked = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Session>> {
        let state = self.state.lock().await;
        let mut sessions: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }
}

#[async_trait]
impl CandidateRepository for InMemoryDatabase {
    async fn load_collection(
        &self,
        candidate_id: i64,
        kind: CollectionKind,
    ) -> AppResult<Option<Value>> {
        let state = self.state.lock().await;
        Ok(state.candidates.get(&candidate_id).map(|c| {
            c.collections.get(&kind).cloned().unwrap_or(Value::Null)
        }))
    }

    async fn mutate_collection(
        &self,
        candidate_id: i64,
        kind: CollectionKind,
        mutation: CollectionMutation<'_>,
    ) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let stored = state
            .candidates
            .get_mut(&candidate_id)
            .ok_or_else(|| AppError::not_found(format!("Candidate {candidate_id} not found")))?;

        let current = stored.collections.get(&kind).cloned().unwrap_or(Value::Null);
        if let Some(updated) = mutation(current)? {
            stored.collections.insert(kind, updated);
        }
        Ok(())
    }
}
