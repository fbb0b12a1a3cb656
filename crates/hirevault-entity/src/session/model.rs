//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per login, keyed by the refresh token it issued.
///
/// Sessions are never deleted in normal operation. The only mutation is
/// setting `is_blocked`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The encoded refresh token issued at login.
    #[serde(skip_serializing)]
    pub refresh_token: String,
    /// User-Agent header of the login request.
    pub user_agent: String,
    /// Client IP address of the login request.
    pub client_ip: String,
    /// Whether the session has been revoked.
    pub is_blocked: bool,
    /// When the session stops being usable.
    pub expires_at: DateTime<Utc>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// The user this session belongs to.
    pub user_id: i64,
}

impl Session {
    /// Usable at `now`: not blocked and `now <= expires_at`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_blocked && now <= self.expires_at
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The user this session belongs to.
    pub user_id: i64,
    /// The encoded refresh token.
    pub refresh_token: String,
    /// User-Agent header.
    pub user_agent: String,
    /// Client IP address.
    pub client_ip: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// Login time, taken from the caller's clock.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: DateTime<Utc>, is_blocked: bool) -> Session {
        Session {
            id: Uuid::new_v4(),
            refresh_token: "token".into(),
            user_agent: "test".into(),
            client_ip: "127.0.0.1".into(),
            is_blocked,
            expires_at,
            created_at: expires_at - Duration::hours(1),
            user_id: 1,
        }
    }

    #[test]
    fn test_usable_until_expiry_inclusive() {
        let now = Utc::now();
        assert!(session(now, false).is_usable_at(now));
        assert!(!session(now, false).is_usable_at(now + Duration::seconds(1)));
    }

    #[test]
    fn test_blocked_is_never_usable() {
        let now = Utc::now();
        assert!(!session(now + Duration::hours(1), true).is_usable_at(now));
    }
}
