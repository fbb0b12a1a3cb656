//! Typed views of the verifiable sub-records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::detail::VerificationDetail;
use super::kind::CollectionKind;
use super::Verifiable;

/// A stored field that may be absent (`None`), explicitly `null`
/// (`Some(None)`) or set. Rewrites reproduce whichever form was read.
pub type Nullable<T> = Option<Option<T>>;

fn present<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// An entry of a candidate's work history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: Uuid,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub company: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub start_date: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub end_date: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub location: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub attachment_ids: Nullable<Vec<Uuid>>,
    #[serde(default)]
    pub verifications: Vec<VerificationDetail>,
    /// Fields not modelled above, preserved as stored.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A degree or course of study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub degree: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub major: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub school: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub graduation_date: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub attachment_ids: Nullable<Vec<Uuid>>,
    #[serde(default)]
    pub verifications: Vec<VerificationDetail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A professional certification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: Uuid,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub certifier: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub certification_name: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub attachment_ids: Nullable<Vec<Uuid>>,
    #[serde(default)]
    pub verifications: Vec<VerificationDetail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Self-directed learning or development activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalGrowth {
    pub id: Uuid,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub area_of_focus: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub activity_method: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub timeframe: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub skills_gained: Nullable<Vec<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub attachment_ids: Nullable<Vec<Uuid>>,
    #[serde(default)]
    pub verifications: Vec<VerificationDetail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A situation/actions/results story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessStory {
    pub id: Uuid,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub headline: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub situation: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub actions: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub results: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub skills: Nullable<Vec<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub relevant_experience: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub timeframe: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub attachment_ids: Nullable<Vec<Uuid>>,
    #[serde(default)]
    pub verifications: Vec<VerificationDetail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

macro_rules! impl_verifiable {
    ($($ty:ty => $kind:expr),+ $(,)?) => {
        $(
            impl Verifiable for $ty {
                const KIND: CollectionKind = $kind;

                fn id(&self) -> Uuid {
                    self.id
                }

                fn verifications(&self) -> &[VerificationDetail] {
                    &self.verifications
                }

                fn verifications_mut(&mut self) -> &mut Vec<VerificationDetail> {
                    &mut self.verifications
                }
            }
        )+
    };
}

impl_verifiable! {
    WorkExperience => CollectionKind::WorkExperience,
    Education => CollectionKind::Education,
    Certification => CollectionKind::Certifications,
    PersonalGrowth => CollectionKind::PersonalGrowth,
    SuccessStory => CollectionKind::SuccessStories,
}
