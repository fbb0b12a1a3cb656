//! Verifiable candidate sub-records and their recruiter attestations.
//!
//! Each candidate collection is stored as a JSON array inside the candidate
//! row. Elements are re-validated into the typed records below on every
//! ledger operation. Fields the typed records do not name are kept in a
//! flattened map so a rewrite never drops data.

pub mod detail;
pub mod kind;
pub mod records;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use hirevault_core::{AppError, AppResult};

pub use detail::VerificationDetail;
pub use kind::CollectionKind;
pub use records::{Certification, Education, PersonalGrowth, SuccessStory, WorkExperience};

/// A sub-record that carries a verification list.
pub trait Verifiable: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The collection this record type lives in.
    const KIND: CollectionKind;

    /// Stable identifier of this sub-record.
    fn id(&self) -> Uuid;

    /// Current attestations.
    fn verifications(&self) -> &[VerificationDetail];

    /// Mutable access to the attestations.
    fn verifications_mut(&mut self) -> &mut Vec<VerificationDetail>;

    /// Whether `recruiter_id` has already attested to this record.
    fn is_verified_by(&self, recruiter_id: i64) -> bool {
        self.verifications()
            .iter()
            .any(|v| v.recruiter_id == recruiter_id)
    }
}

/// Decode a stored collection column into typed records.
///
/// `null` is an empty collection. Elements may be JSON objects or strings
/// holding a JSON-encoded object. Any element that fails to decode fails
/// the whole collection with a validation error.
pub fn decode_collection<T: Verifiable>(raw: &Value) -> AppResult<Vec<T>> {
    let elements = match raw {
        Value::Null => return Ok(Vec::new()),
        Value::Array(elements) => elements,
        other => {
            return Err(AppError::validation(format!(
                "Stored {} is not a list (found {})",
                T::KIND,
                json_type_name(other)
            )));
        }
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| decode_element::<T>(index, element))
        .collect()
}

/// Encode typed records back into the stored column representation.
pub fn encode_collection<T: Verifiable>(records: &[T]) -> AppResult<Value> {
    Ok(serde_json::to_value(records)?)
}

fn decode_element<T: Verifiable>(index: usize, element: &Value) -> AppResult<T> {
    let decoded = match element {
        Value::String(encoded) => serde_json::from_str::<T>(encoded),
        other => serde_json::from_value::<T>(other.clone()),
    };
    decoded.map_err(|e| {
        AppError::with_source(
            hirevault_core::error::ErrorKind::Validation,
            format!("Invalid {} entry at index {index}: {e}", T::KIND),
            e,
        )
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
