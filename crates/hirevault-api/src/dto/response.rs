//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hirevault_auth::{Actor, Payload};
use hirevault_entity::user::{AccountType, User};
use hirevault_entity::verification::CollectionKind;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Scheme clients put in front of the access token.
pub const TOKEN_TYPE: &str = "bearer";

/// Login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
    /// Session backing the refresh token.
    pub session_id: Uuid,
    pub user: UserResponse,
}

/// Refresh response. The refresh token itself is not rotated.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub access_expires_at: DateTime<Utc>,
}

impl RefreshResponse {
    /// Builds the response from a freshly issued access token.
    pub fn new(access_token: String, payload: &Payload) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE,
            access_expires_at: payload.expires_at,
        }
    }
}

/// Logout response.
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
    pub session_id: Uuid,
}

/// The caller as seen by the API.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub account_type: AccountType,
    /// Recruiter or candidate id linked to the user.
    pub profile_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserResponse {
    /// Summary of a user row with the profile id carried by its token.
    pub fn from_user(user: &User, profile_id: Option<i64>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            account_type: user.account_type,
            profile_id,
            first_name: None,
            last_name: None,
        }
    }
}

impl From<&Actor> for UserResponse {
    fn from(actor: &Actor) -> Self {
        let (first_name, last_name) = actor.names();
        Self {
            first_name: first_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
            ..Self::from_user(actor.user(), Some(actor.profile_id()))
        }
    }
}

/// Result of a verify or unverify call.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResponse {
    pub candidate_id: i64,
    pub collection: CollectionKind,
    pub sub_record_id: Uuid,
    /// `verified`, `already_verified`, `removed` or `no_change`.
    pub outcome: &'static str,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected` or `unavailable`.
    pub database: String,
}
