//! `AuthUser` extractor: pulls the access token from the Authorization
//! header, validates it and resolves the caller to an [`Actor`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use hirevault_auth::Actor;
use hirevault_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

impl AuthUser {
    /// Returns the resolved actor.
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Actor;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A missing or non-Bearer header is indistinguishable from a bad token.
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::invalid_credentials())?;

        let payload = state.tokens.validate_access(bearer.token())?;
        let actor = state.identity.resolve(&payload).await?;

        Ok(AuthUser(actor))
    }
}
