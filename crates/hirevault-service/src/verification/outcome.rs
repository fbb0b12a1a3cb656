//! Results of ledger operations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Result of [`super::VerificationLedger::verify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// A new attestation was recorded.
    Verified,
    /// This recruiter had already attested; nothing was written.
    AlreadyVerified,
}

/// Result of [`super::VerificationLedger::unverify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnverifyOutcome {
    /// The recruiter's attestation was removed.
    Removed,
    /// The recruiter had no attestation; nothing was written.
    NoChange,
}

impl VerifyOutcome {
    /// Snake-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::AlreadyVerified => "already_verified",
        }
    }
}

impl UnverifyOutcome {
    /// Snake-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Removed => "removed",
            Self::NoChange => "no_change",
        }
    }
}

/// An attestation with the recruiter's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerVerification {
    pub recruiter_id: i64,
    pub verified_at: DateTime<Utc>,
    /// `None` when the recruiter no longer exists or has no name.
    pub recruiter_name: Option<String>,
}

/// One sub-record as stored, with enriched attestations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRecord {
    /// Every stored field except `verifications`.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub verifications: Vec<LedgerVerification>,
}
