//! Login, refresh and logout flows.

use std::sync::Arc;

use tracing::{error, info, warn};

use hirevault_core::error::AppError;
use hirevault_database::repositories::UserRepository;
use hirevault_entity::session::Session;
use hirevault_entity::user::User;

use crate::identity::IdentityResolver;
use crate::password::PasswordHasher;
use crate::token::{Payload, TokenService, TokenType};

use super::store::SessionStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Encoded access token.
    pub access_token: String,
    /// Encoded refresh token.
    pub refresh_token: String,
    /// Claims of the access token.
    pub access_payload: Payload,
    /// Claims of the refresh token.
    pub refresh_payload: Payload,
    /// The session row created for this login.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// Result of a successful refresh.
#[derive(Debug, Clone)]
pub struct RefreshResult {
    /// Newly issued access token.
    pub access_token: String,
    /// Its claims.
    pub access_payload: Payload,
}

/// Combines the pure token service with the session store.
#[derive(Clone)]
pub struct SessionManager {
    tokens: Arc<TokenService>,
    sessions: Arc<SessionStore>,
    users: Arc<dyn UserRepository>,
    identity: Arc<IdentityResolver>,
    password_hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("policy", &self.tokens.policy())
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        tokens: Arc<TokenService>,
        sessions: Arc<SessionStore>,
        users: Arc<dyn UserRepository>,
        identity: Arc<IdentityResolver>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            tokens,
            sessions,
            users,
            identity,
            password_hasher,
        }
    }

    /// Authenticate by email or username and open a session.
    ///
    /// 1. Look up the user
    /// 2. Verify the password
    /// 3. Issue an access and a refresh token
    /// 4. Persist the refresh side as a session expiring with the token
    ///
    /// Unknown users, wrong passwords and unreadable stored hashes all
    /// produce the same `InvalidCredentials` error.
    pub async fn login(
        &self,
        login: &str,
        password: &str,
        user_agent: &str,
        client_ip: &str,
    ) -> Result<LoginResult, AppError> {
        // Step 1: Find user
        let Some(user) = self.users.find_by_login(login).await? else {
            self.password_hasher.verify_decoy(password);
            warn!(login = %login, client_ip = %client_ip, "Login rejected: unknown user");
            return Err(AppError::invalid_credentials());
        };

        // Step 2: Verify password
        match self
            .password_hasher
            .verify_password(password, &user.password_hash)
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(user_id = user.id, client_ip = %client_ip, "Login rejected: wrong password");
                return Err(AppError::invalid_credentials());
            }
            Err(e) => {
                error!(user_id = user.id, error = %e, "Stored password hash could not be verified");
                return Err(AppError::invalid_credentials());
            }
        }

        // Step 3: Issue tokens
        let role_id = self.identity.profile_id(user.id, user.account_type).await?;
        let (access_payload, access_token) =
            self.tokens
                .issue(TokenType::Access, user.id, user.account_type, role_id)?;
        let (refresh_payload, refresh_token) =
            self.tokens
                .issue(TokenType::Refresh, user.id, user.account_type, role_id)?;

        // Step 4: Persist session
        let session = self
            .sessions
            .create(
                user.id,
                &refresh_token,
                user_agent,
                client_ip,
                refresh_payload.expires_at,
            )
            .await?;

        info!(
            user_id = user.id,
            account_type = %user.account_type,
            session_id = %session.id,
            "Login successful"
        );

        Ok(LoginResult {
            access_token,
            refresh_token,
            access_payload,
            refresh_payload,
            session,
            user,
        })
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The token must validate and its session must be usable. No new
    /// session is created and the refresh token is not rotated.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult, AppError> {
        let payload = self.tokens.validate_refresh(refresh_token)?;

        let session = self.sessions.find_by_refresh_token(refresh_token).await?;
        if !self.sessions.is_usable(session.as_ref()) {
            warn!(
                user_id = payload.user_id,
                session_id = ?session.as_ref().map(|s| s.id),
                "Refresh rejected: session missing, blocked or expired"
            );
            return Err(AppError::invalid_refresh_token());
        }
        if session.as_ref().is_some_and(|s| s.user_id != payload.user_id) {
            warn!(user_id = payload.user_id, "Refresh rejected: session belongs to another user");
            return Err(AppError::invalid_refresh_token());
        }

        let (access_payload, access_token) = self.tokens.issue(
            TokenType::Access,
            payload.user_id,
            payload.account_type,
            payload.role_id,
        )?;

        info!(user_id = payload.user_id, token_id = %access_payload.id, "Access token refreshed");

        Ok(RefreshResult {
            access_token,
            access_payload,
        })
    }

    /// Block the session owning `refresh_token`. Repeating a logout succeeds.
    ///
    /// Access tokens already issued stay valid until they expire.
    pub async fn logout(&self, refresh_token: &str) -> Result<Session, AppError> {
        match self.sessions.block_by_refresh_token(refresh_token).await? {
            Some(session) => {
                info!(user_id = session.user_id, session_id = %session.id, "Logged out");
                Ok(session)
            }
            None => {
                warn!("Logout rejected: unknown refresh token");
                Err(AppError::invalid_refresh_token())
            }
        }
    }

    /// The session store, for administrative use.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// The token service.
    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }
}
