//! Candidate profile model.
//!
//! Only the scalar columns are mapped here. The five verifiable collections
//! live in JSONB columns on the same row and are loaded per collection
//! through the candidate repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The candidate profile linked to a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    /// Candidate profile identifier.
    pub id: i64,
    /// Owning user. Candidates imported from a CV may not have one yet.
    pub user_id: Option<i64>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Contact email (may differ from the login email).
    pub email: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Current or desired job title.
    pub job_title: Option<String>,
    /// Total years of professional experience.
    pub years_of_experience: Option<i32>,
    /// Pipeline status, e.g. `applied`.
    pub status: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    /// Whether this profile belongs to the given user.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }
}
