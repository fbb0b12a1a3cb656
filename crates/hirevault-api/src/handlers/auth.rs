//! Auth handlers: login, refresh, logout and the current identity.
//!
//! The refresh token travels in an HttpOnly cookie scoped to `/api/auth`.
//! Clients that cannot hold cookies may send it in the JSON body instead.
//! The cookie is tried first; a rejected cookie falls back to a different
//! token in the body.

use std::future::Future;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, info};
use validator::Validate;

use hirevault_core::config::AuthConfig;
use hirevault_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{
    ApiResponse, LoginResponse, LogoutResponse, RefreshResponse, TOKEN_TYPE, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ClientInfo};
use crate::state::AppState;

/// Path the refresh cookie is sent to.
pub const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    req.validate()
        .map_err(|e| ApiError::bad_request(AppError::validation(e.to_string())))?;

    let result = state
        .session_manager
        .login(&req.login, &req.password, &client.user_agent, &client.client_ip)
        .await?;

    let jar = jar.add(refresh_cookie(&state.config.auth, result.refresh_token.clone()));

    Ok((
        jar,
        Json(ApiResponse::ok(LoginResponse {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: TOKEN_TYPE,
            access_expires_at: result.access_payload.expires_at,
            refresh_expires_at: result.refresh_payload.expires_at,
            session_id: result.session.id,
            user: UserResponse::from_user(&result.user, result.access_payload.role_id),
        })),
    ))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    let manager = &state.session_manager;
    let result = with_refresh_token(&state.config.auth, &jar, &body, move |token| async move {
        manager.refresh(&token).await
    })
    .await?;

    Ok(Json(ApiResponse::ok(RefreshResponse::new(
        result.access_token,
        &result.access_payload,
    ))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<ApiResponse<LogoutResponse>>), ApiError> {
    let manager = &state.session_manager;
    let session = with_refresh_token(&state.config.auth, &jar, &body, move |token| async move {
        manager.logout(&token).await
    })
    .await?;

    info!(session_id = %session.id, user_id = session.user_id, "Logout via API");

    let jar = jar.remove(
        Cookie::build((state.config.auth.refresh_cookie_name.clone(), ""))
            .path(REFRESH_COOKIE_PATH),
    );

    Ok((
        jar,
        Json(ApiResponse::ok(LogoutResponse {
            message: "Logged out".to_string(),
            session_id: session.id,
        })),
    ))
}

/// GET /api/auth/user
pub async fn current_user(auth: AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(UserResponse::from(auth.actor())))
}

fn refresh_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.refresh_cookie_name.clone(), token))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .path(REFRESH_COOKIE_PATH)
        .build()
}

/// Run `op` with the presented refresh token.
///
/// The cookie goes first. If `op` rejects it and the body carries a
/// different token, that one is tried too; otherwise the cookie's error
/// stands.
async fn with_refresh_token<T, F, Fut>(
    config: &AuthConfig,
    jar: &CookieJar,
    body: &Bytes,
    op: F,
) -> Result<T, ApiError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let cookie = jar
        .get(&config.refresh_cookie_name)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty());

    let mut cookie_error = None;
    if let Some(token) = cookie.clone() {
        match op(token).await {
            Ok(value) => return Ok(value),
            Err(e) => cookie_error = Some(e),
        }
    }

    let body_token = match body_refresh_token(body) {
        Ok(token) => token,
        Err(e) => return Err(cookie_error.map(ApiError::from).unwrap_or(e)),
    };

    match body_token.filter(|t| cookie.as_deref() != Some(t.as_str())) {
        Some(token) => {
            if cookie_error.is_some() {
                debug!("Refresh cookie rejected, using token from body");
            }
            Ok(op(token).await?)
        }
        None => Err(cookie_error
            .unwrap_or_else(AppError::invalid_refresh_token)
            .into()),
    }
}

/// `{"refresh_token": ...}` from the body. An empty body carries no token.
fn body_refresh_token(body: &Bytes) -> Result<Option<String>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let request = serde_json::from_slice::<RefreshRequest>(body).map_err(|e| {
        ApiError::bad_request(AppError::validation(format!("Invalid request body: {e}")))
    })?;
    Ok(request.refresh_token.filter(|t| !t.is_empty()))
}
