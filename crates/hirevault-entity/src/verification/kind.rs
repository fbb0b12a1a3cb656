//! Names of the verifiable candidate collections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use hirevault_core::AppError;

/// The five candidate collections whose entries can be verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// `work_experience` column.
    WorkExperience,
    /// `education` column.
    Education,
    /// `certifications` column.
    Certifications,
    /// `personal_growth` column.
    PersonalGrowth,
    /// `success_stories` column.
    SuccessStories,
}

impl CollectionKind {
    /// Every collection, in column order.
    pub const ALL: [CollectionKind; 5] = [
        Self::WorkExperience,
        Self::Education,
        Self::Certifications,
        Self::PersonalGrowth,
        Self::SuccessStories,
    ];

    /// The JSONB column on `candidates` holding this collection.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::WorkExperience => "work_experience",
            Self::Education => "education",
            Self::Certifications => "certifications",
            Self::PersonalGrowth => "personal_growth",
            Self::SuccessStories => "success_stories",
        }
    }

    /// URL path segment.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::WorkExperience => "work-experience",
            Self::Education => "education",
            Self::Certifications => "certifications",
            Self::PersonalGrowth => "personal-growth",
            Self::SuccessStories => "success-stories",
        }
    }

    /// Human-readable name of a single entry, used in error messages.
    pub fn entry_label(&self) -> &'static str {
        match self {
            Self::WorkExperience => "Work experience",
            Self::Education => "Education",
            Self::Certifications => "Certification",
            Self::PersonalGrowth => "Personal growth",
            Self::SuccessStories => "Success story",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl FromStr for CollectionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.column_name() == normalized)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Unknown collection '{s}'. Expected one of: {}",
                    Self::ALL.map(|k| k.slug()).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_slug_and_snake_case() {
        assert_eq!(
            "work-experience".parse::<CollectionKind>().unwrap(),
            CollectionKind::WorkExperience
        );
        assert_eq!(
            "success_stories".parse::<CollectionKind>().unwrap(),
            CollectionKind::SuccessStories
        );
        assert!("skills".parse::<CollectionKind>().is_err());
    }

    #[test]
    fn test_slug_round_trips() {
        for kind in CollectionKind::ALL {
            assert_eq!(kind.slug().parse::<CollectionKind>().unwrap(), kind);
        }
    }
}
