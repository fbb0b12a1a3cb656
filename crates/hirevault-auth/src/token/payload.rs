//! Token claim set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hirevault_entity::user::AccountType;

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived, stateless credential for API requests.
    Access,
    /// Long-lived credential tied to a session row.
    Refresh,
}

impl TokenType {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The claim set carried by every token, encoded flat.
///
/// Timestamps are serialized as RFC 3339 strings. A payload is never
/// modified after issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Unique per issuance.
    pub id: Uuid,
    /// Subject user.
    pub user_id: i64,
    /// Access or refresh.
    pub token_type: TokenType,
    /// Role the subject held at issuance.
    pub account_type: AccountType,
    /// Issuance instant.
    pub issued_at: DateTime<Utc>,
    /// Last instant at which the token is valid.
    pub expires_at: DateTime<Utc>,
    /// Always `false` when issued.
    pub is_revoked: bool,
    /// Recruiter or candidate profile id, when known at issuance.
    #[serde(default)]
    pub role_id: Option<i64>,
}

impl Payload {
    /// `expires_at` strictly after `issued_at`.
    pub fn has_valid_window(&self) -> bool {
        self.expires_at > self.issued_at
    }

    /// Expired or revoked at `now`. `now == expires_at` still counts as live.
    pub fn is_expired_or_revoked_at(&self, now: DateTime<Utc>) -> bool {
        self.is_revoked || now > self.expires_at
    }
}
