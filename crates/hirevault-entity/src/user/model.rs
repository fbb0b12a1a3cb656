//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::account_type::AccountType;

/// A registered user. Registration happens elsewhere; this crate only reads users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Which profile this user owns.
    pub account_type: AccountType,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the user is a recruiter.
    pub fn is_recruiter(&self) -> bool {
        self.account_type == AccountType::Recruiter
    }
}
