//! Account type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which role-specific profile a user owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Reviews candidates and attests to their records.
    Recruiter,
    /// Owns a profile with verifiable sub-records.
    Candidate,
}

impl AccountType {
    /// Return the account type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recruiter => "recruiter",
            Self::Candidate => "candidate",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = hirevault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recruiter" => Ok(Self::Recruiter),
            "candidate" => Ok(Self::Candidate),
            _ => Err(hirevault_core::AppError::validation(format!(
                "Invalid account type: '{s}'. Expected one of: recruiter, candidate"
            ))),
        }
    }
}
