//! Recruiter profile model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The recruiter profile linked to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recruiter {
    /// Recruiter profile identifier. This is the id recorded in verifications.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}

impl Recruiter {
    /// "First Last", skipping missing parts. `None` when both are missing.
    pub fn full_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// Projection used when enriching verification entries with names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RecruiterName {
    /// Recruiter profile identifier.
    pub id: i64,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}

impl RecruiterName {
    /// "First Last", skipping missing parts.
    pub fn full_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

impl From<&Recruiter> for RecruiterName {
    fn from(r: &Recruiter) -> Self {
        Self {
            id: r.id,
            first_name: r.first_name.clone(),
            last_name: r.last_name.clone(),
        }
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recruiter(first: Option<&str>, last: Option<&str>) -> Recruiter {
        Recruiter {
            id: 1,
            user_id: 10,
            first_name: first.map(String::from),
            last_name: last.map(String::from),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(
            recruiter(Some("Ada"), Some("Lovelace")).full_name().as_deref(),
            Some("Ada Lovelace")
        );
        assert_eq!(recruiter(None, Some("Hopper")).full_name().as_deref(), Some("Hopper"));
        assert_eq!(recruiter(None, Some("  ")).full_name(), None);
    }
}
