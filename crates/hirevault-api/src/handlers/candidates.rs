//! Candidate collection handlers: list, verify and unverify.

use axum::Json;
use axum::extract::{Path, State};

use hirevault_service::LedgerRecord;

use crate::dto::response::{ApiResponse, VerificationResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::path::{parse_collection, parse_uuid};
use crate::state::AppState;

/// GET /api/candidates/{id}/{collection}
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((candidate_id, collection)): Path<(i64, String)>,
) -> Result<Json<ApiResponse<Vec<LedgerRecord>>>, ApiError> {
    let kind = parse_collection(&collection)?;
    let records = state.ledger.list(auth.actor(), candidate_id, kind).await?;
    Ok(Json(ApiResponse::ok(records)))
}

/// PUT /api/candidates/{id}/{collection}/{sub_id}/verify
pub async fn verify(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((candidate_id, collection, sub_id)): Path<(i64, String, String)>,
) -> Result<Json<ApiResponse<VerificationResponse>>, ApiError> {
    let kind = parse_collection(&collection)?;
    let sub_record_id = parse_uuid(&sub_id)?;

    let outcome = state
        .ledger
        .verify(auth.actor(), candidate_id, kind, sub_record_id)
        .await?;

    Ok(Json(ApiResponse::ok(VerificationResponse {
        candidate_id,
        collection: kind,
        sub_record_id,
        outcome: outcome.as_str(),
    })))
}

/// PUT or DELETE /api/candidates/{id}/{collection}/{sub_id}/unverify
pub async fn unverify(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((candidate_id, collection, sub_id)): Path<(i64, String, String)>,
) -> Result<Json<ApiResponse<VerificationResponse>>, ApiError> {
    let kind = parse_collection(&collection)?;
    let sub_record_id = parse_uuid(&sub_id)?;

    let outcome = state
        .ledger
        .unverify(auth.actor(), candidate_id, kind, sub_record_id)
        .await?;

    Ok(Json(ApiResponse::ok(VerificationResponse {
        candidate_id,
        collection: kind,
        sub_record_id,
        outcome: outcome.as_str(),
    })))
}
