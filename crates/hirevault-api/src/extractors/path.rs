//! Typed path parameter helpers.

use uuid::Uuid;

use hirevault_core::error::AppError;
use hirevault_entity::verification::CollectionKind;

use crate::error::ApiError;

/// Parses a UUID from a path segment.
pub fn parse_uuid(s: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(s)
        .map_err(|_| ApiError::bad_request(AppError::validation(format!("Invalid UUID: {s}"))))
}

/// Parses a collection name from a path segment (`work-experience` or `work_experience`).
pub fn parse_collection(s: &str) -> Result<CollectionKind, ApiError> {
    s.parse::<CollectionKind>().map_err(ApiError::bad_request)
}
