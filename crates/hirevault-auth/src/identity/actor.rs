//! The resolved, role-tagged caller.

use serde::Serialize;

use hirevault_entity::candidate::Candidate;
use hirevault_entity::recruiter::Recruiter;
use hirevault_entity::user::{AccountType, User};

/// An authenticated user together with the profile its role requires.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "account_type", rename_all = "lowercase")]
pub enum Actor {
    /// A recruiter; may attest to candidate records.
    Recruiter {
        /// The user row.
        user: User,
        /// The linked recruiter profile.
        recruiter: Recruiter,
    },
    /// A candidate; may read their own records.
    Candidate {
        /// The user row.
        user: User,
        /// The linked candidate profile.
        candidate: Candidate,
    },
}

impl Actor {
    /// The underlying user.
    pub fn user(&self) -> &User {
        match self {
            Self::Recruiter { user, .. } | Self::Candidate { user, .. } => user,
        }
    }

    /// The role this actor was resolved as.
    pub fn account_type(&self) -> AccountType {
        match self {
            Self::Recruiter { .. } => AccountType::Recruiter,
            Self::Candidate { .. } => AccountType::Candidate,
        }
    }

    /// The recruiter profile, for recruiter actors.
    pub fn recruiter(&self) -> Option<&Recruiter> {
        match self {
            Self::Recruiter { recruiter, .. } => Some(recruiter),
            Self::Candidate { .. } => None,
        }
    }

    /// The candidate profile, for candidate actors.
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            Self::Candidate { candidate, .. } => Some(candidate),
            Self::Recruiter { .. } => None,
        }
    }

    /// Profile id of whichever role this actor holds.
    pub fn profile_id(&self) -> i64 {
        match self {
            Self::Recruiter { recruiter, .. } => recruiter.id,
            Self::Candidate { candidate, .. } => candidate.id,
        }
    }

    /// Profile first and last name.
    pub fn names(&self) -> (Option<&str>, Option<&str>) {
        match self {
            Self::Recruiter { recruiter, .. } => {
                (recruiter.first_name.as_deref(), recruiter.last_name.as_deref())
            }
            Self::Candidate { candidate, .. } => {
                (candidate.first_name.as_deref(), candidate.last_name.as_deref())
            }
        }
    }
}
