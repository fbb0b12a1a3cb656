//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use hirevault_auth::{IdentityResolver, PasswordHasher, SessionManager, SessionStore, TokenService};
use hirevault_core::config::AppConfig;
use hirevault_core::error::AppError;
use hirevault_core::traits::Clock;
use hirevault_database::Repositories;
use hirevault_service::VerificationLedger;

/// Shared application state passed to all Axum handlers via `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Storage gateways.
    pub repositories: Repositories,
    /// Stateless token issue/validate.
    pub tokens: Arc<TokenService>,
    /// Login, refresh and logout.
    pub session_manager: Arc<SessionManager>,
    /// Access token to actor.
    pub identity: Arc<IdentityResolver>,
    /// Recruiter attestations on candidate records.
    pub ledger: Arc<VerificationLedger>,
}

impl AppState {
    /// Wires the auth and service layers over the given repositories.
    ///
    /// Every time-dependent component shares `clock`.
    pub fn new(
        config: AppConfig,
        repositories: Repositories,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let tokens = Arc::new(TokenService::from_config(
            &config.auth,
            Arc::clone(&clock),
        )?);
        let sessions = Arc::new(SessionStore::new(
            Arc::clone(&repositories.sessions),
            Arc::clone(&clock),
        ));
        let identity = Arc::new(IdentityResolver::new(Arc::clone(&repositories.users)));
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&tokens),
            sessions,
            Arc::clone(&repositories.users),
            Arc::clone(&identity),
            Arc::new(PasswordHasher::new()),
        ));
        let ledger = Arc::new(VerificationLedger::new(
            Arc::clone(&repositories.candidates),
            Arc::clone(&repositories.users),
            clock,
        ));

        Ok(Self {
            config: Arc::new(config),
            repositories,
            tokens,
            session_manager,
            identity,
            ledger,
        })
    }
}
