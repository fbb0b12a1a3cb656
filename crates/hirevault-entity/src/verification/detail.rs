//! A single recruiter attestation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recruiter's attestation on a sub-record. At most one per recruiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDetail {
    /// Recruiter profile id of the attesting recruiter.
    pub recruiter_id: i64,
    /// When the attestation was recorded.
    pub verified_at: DateTime<Utc>,
}

impl VerificationDetail {
    /// Record an attestation by `recruiter_id` at `verified_at`.
    pub fn new(recruiter_id: i64, verified_at: DateTime<Utc>) -> Self {
        Self {
            recruiter_id,
            verified_at,
        }
    }
}
