//! Access payload to [`Actor`] resolution.

use std::sync::Arc;

use tracing::warn;

use hirevault_core::error::AppError;
use hirevault_database::repositories::UserRepository;
use hirevault_entity::user::AccountType;

use crate::token::Payload;

use super::actor::Actor;

/// Loads the user behind a validated access token and its role profile.
#[derive(Clone)]
pub struct IdentityResolver {
    users: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver").finish_non_exhaustive()
    }
}

impl IdentityResolver {
    /// Create a new resolver.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Resolve `payload` into an [`Actor`].
    ///
    /// The user must exist, its stored account type must equal the one in
    /// the token, and a profile of that type must be linked. Any failure is
    /// `InvalidCredentials`.
    pub async fn resolve(&self, payload: &Payload) -> Result<Actor, AppError> {
        let Some(user) = self.users.find_by_id(payload.user_id).await? else {
            warn!(user_id = payload.user_id, "Token subject does not exist");
            return Err(AppError::invalid_credentials());
        };

        if user.account_type != payload.account_type {
            warn!(
                user_id = user.id,
                claimed = %payload.account_type,
                stored = %user.account_type,
                "Token account type does not match user"
            );
            return Err(AppError::invalid_credentials());
        }

        let actor = match user.account_type {
            AccountType::Recruiter => self
                .users
                .find_recruiter_by_user(user.id)
                .await?
                .map(|recruiter| Actor::Recruiter {
                    user: user.clone(),
                    recruiter,
                }),
            AccountType::Candidate => self
                .users
                .find_candidate_by_user(user.id)
                .await?
                .map(|candidate| Actor::Candidate {
                    user: user.clone(),
                    candidate,
                }),
        };

        actor.ok_or_else(|| {
            warn!(user_id = user.id, account_type = %user.account_type, "User has no linked profile");
            AppError::invalid_credentials()
        })
    }

    /// Profile id linked to `user_id` for `account_type`, if any.
    pub async fn profile_id(
        &self,
        user_id: i64,
        account_type: AccountType,
    ) -> Result<Option<i64>, AppError> {
        Ok(match account_type {
            AccountType::Recruiter => self
                .users
                .find_recruiter_by_user(user_id)
                .await?
                .map(|r| r.id),
            AccountType::Candidate => self
                .users
                .find_candidate_by_user(user_id)
                .await?
                .map(|c| c.id),
        })
    }
}
