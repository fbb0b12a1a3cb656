//! Issuing and validating access and refresh tokens.
//!
//! The service is pure: it never touches the session store. Whether a
//! refresh token's session is still usable is decided by
//! [`crate::session::SessionManager`].

use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use tracing::debug;
use uuid::Uuid;

use hirevault_core::config::AuthConfig;
use hirevault_core::error::AppError;
use hirevault_core::traits::Clock;
use hirevault_entity::user::AccountType;

use super::codec::TokenCodec;
use super::payload::{Payload, TokenType};

/// Lifetimes applied by [`TokenService::issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    /// Access token lifetime.
    pub access_ttl: Duration,
    /// Refresh token lifetime.
    pub refresh_ttl: Duration,
}

impl TokenPolicy {
    /// Access TTL in minutes, refresh TTL in seconds.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        let access_ttl = i64::try_from(config.access_token_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| AppError::configuration("auth.access_token_ttl_minutes is out of range"))?;
        let refresh_ttl = i64::try_from(config.refresh_token_ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| AppError::configuration("auth.refresh_token_ttl_seconds is out of range"))?;
        Ok(Self {
            access_ttl,
            refresh_ttl,
        })
    }

    /// Lifetime for tokens of `kind`.
    pub fn ttl(&self, kind: TokenType) -> Duration {
        match kind {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        }
    }
}

/// Builds and validates tokens. Access and refresh tokens use separate codecs.
#[derive(Debug, Clone)]
pub struct TokenService {
    access: TokenCodec,
    refresh: TokenCodec,
    policy: TokenPolicy,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Assemble a service from explicit parts.
    pub fn new(
        access: TokenCodec,
        refresh: TokenCodec,
        policy: TokenPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            access,
            refresh,
            policy,
            clock,
        }
    }

    /// Build the codecs and policy from auth configuration.
    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        config.validate()?;
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|e| {
            AppError::configuration(format!("Invalid auth.algorithm '{}': {e}", config.algorithm))
        })?;

        Ok(Self::new(
            TokenCodec::new(config.access_token_secret.as_bytes(), algorithm)?,
            TokenCodec::new(config.refresh_token_secret.as_bytes(), algorithm)?,
            TokenPolicy::from_config(config)?,
            clock,
        ))
    }

    /// The configured lifetimes.
    pub fn policy(&self) -> TokenPolicy {
        self.policy
    }

    /// The clock the service judges expiry against.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Issue a token of `kind` with the configured lifetime.
    pub fn issue(
        &self,
        kind: TokenType,
        user_id: i64,
        account_type: AccountType,
        role_id: Option<i64>,
    ) -> Result<(Payload, String), AppError> {
        self.issue_with_ttl(kind, user_id, account_type, role_id, self.policy.ttl(kind))
    }

    /// Issue a token of `kind` living for `ttl`, which must be positive.
    pub fn issue_with_ttl(
        &self,
        kind: TokenType,
        user_id: i64,
        account_type: AccountType,
        role_id: Option<i64>,
        ttl: Duration,
    ) -> Result<(Payload, String), AppError> {
        if ttl <= Duration::zero() {
            return Err(AppError::validation(format!(
                "Token lifetime must be positive, got {ttl}"
            )));
        }

        let issued_at = self.clock.now();
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            AppError::validation(format!("Token lifetime {ttl} is out of range"))
        })?;
        let payload = Payload {
            id: Uuid::new_v4(),
            user_id,
            token_type: kind,
            account_type,
            issued_at,
            expires_at,
            is_revoked: false,
            role_id,
        };
        let token = self.codec(kind).encode(&payload)?;
        Ok((payload, token))
    }

    /// Verify signature, expiry and revocation with the `kind` codec.
    ///
    /// Decode failures are `InvalidCredentials`. Expired and revoked tokens
    /// share `TokenExpiredOrRevoked` so callers cannot tell them apart.
    pub fn validate(&self, kind: TokenType, token: &str) -> Result<Payload, AppError> {
        let payload = self.codec(kind).decode(token).map_err(|e| {
            debug!(token_kind = %kind, error = %e, "Token failed to decode");
            AppError::invalid_credentials()
        })?;

        if payload.is_expired_or_revoked_at(self.clock.now()) {
            debug!(token_id = %payload.id, token_kind = %kind, "Token expired or revoked");
            return Err(AppError::token_expired_or_revoked());
        }

        Ok(payload)
    }

    /// [`validate`](Self::validate) an access token and require its type to be access.
    pub fn validate_access(&self, token: &str) -> Result<Payload, AppError> {
        let payload = self.validate(TokenType::Access, token)?;
        if payload.token_type != TokenType::Access {
            debug!(token_id = %payload.id, "Refresh token presented as access token");
            return Err(AppError::invalid_credentials());
        }
        Ok(payload)
    }

    /// Validate a refresh token. Every failure is `InvalidOrExpiredRefreshToken`.
    pub fn validate_refresh(&self, token: &str) -> Result<Payload, AppError> {
        let payload = self
            .validate(TokenType::Refresh, token)
            .map_err(|_| AppError::invalid_refresh_token())?;
        if payload.token_type != TokenType::Refresh {
            debug!(token_id = %payload.id, "Access token presented as refresh token");
            return Err(AppError::invalid_refresh_token());
        }
        Ok(payload)
    }

    fn codec(&self, kind: TokenType) -> &TokenCodec {
        match kind {
            TokenType::Access => &self.access,
            TokenType::Refresh => &self.refresh,
        }
    }
}
