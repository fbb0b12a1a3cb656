//! Verify and unverify recruiter attestations on candidate sub-records.
//!
//! Each sub-record moves through `Unverified -> Verified -> Unverified` per
//! recruiter. Every write is a read-modify-write of the whole collection
//! column inside one repository mutation, so concurrent calls on the same
//! candidate are serialized by the repository.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use hirevault_auth::Actor;
use hirevault_core::error::AppError;
use hirevault_core::traits::Clock;
use hirevault_database::repositories::{CandidateRepository, UserRepository};
use hirevault_entity::verification::{
    Certification, CollectionKind, Education, PersonalGrowth, SuccessStory, Verifiable,
    VerificationDetail, WorkExperience, decode_collection, encode_collection,
};

use super::outcome::{LedgerRecord, LedgerVerification, UnverifyOutcome, VerifyOutcome};

/// Dispatch a generic ledger method on the record type of a [`CollectionKind`].
macro_rules! for_kind {
    ($kind:expr, $self:ident . $method:ident ( $($arg:expr),* )) => {
        match $kind {
            CollectionKind::WorkExperience => $self.$method::<WorkExperience>($($arg),*).await,
            CollectionKind::Education => $self.$method::<Education>($($arg),*).await,
            CollectionKind::Certifications => $self.$method::<Certification>($($arg),*).await,
            CollectionKind::PersonalGrowth => $self.$method::<PersonalGrowth>($($arg),*).await,
            CollectionKind::SuccessStories => $self.$method::<SuccessStory>($($arg),*).await,
        }
    };
}

/// Recruiter attestations over the candidate collections.
#[derive(Clone)]
pub struct VerificationLedger {
    candidates: Arc<dyn CandidateRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for VerificationLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationLedger").finish_non_exhaustive()
    }
}

impl VerificationLedger {
    /// Creates a new ledger.
    pub fn new(
        candidates: Arc<dyn CandidateRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            candidates,
            users,
            clock,
        }
    }

    /// Record `actor`'s attestation on one sub-record.
    ///
    /// Only recruiters may verify; this is checked before the store is
    /// touched. A second verify by the same recruiter writes nothing.
    pub async fn verify(
        &self,
        actor: &Actor,
        candidate_id: i64,
        kind: CollectionKind,
        sub_record_id: Uuid,
    ) -> Result<VerifyOutcome, AppError> {
        let recruiter_id = require_recruiter(actor, "verify")?;
        let outcome = for_kind!(
            kind,
            self.verify_in(recruiter_id, candidate_id, sub_record_id)
        )?;

        info!(
            candidate_id,
            collection = %kind,
            sub_record_id = %sub_record_id,
            recruiter_id,
            outcome = outcome.as_str(),
            "Verify processed"
        );
        Ok(outcome)
    }

    /// Withdraw `actor`'s attestation from one sub-record.
    ///
    /// Writes nothing when the recruiter had no attestation.
    pub async fn unverify(
        &self,
        actor: &Actor,
        candidate_id: i64,
        kind: CollectionKind,
        sub_record_id: Uuid,
    ) -> Result<UnverifyOutcome, AppError> {
        let recruiter_id = require_recruiter(actor, "unverify")?;
        let outcome = for_kind!(
            kind,
            self.unverify_in(recruiter_id, candidate_id, sub_record_id)
        )?;

        info!(
            candidate_id,
            collection = %kind,
            sub_record_id = %sub_record_id,
            recruiter_id,
            outcome = outcome.as_str(),
            "Unverify processed"
        );
        Ok(outcome)
    }

    /// Read one collection with attestations enriched by recruiter names.
    ///
    /// Recruiters may read any candidate. Candidates may read only their own.
    pub async fn list(
        &self,
        actor: &Actor,
        candidate_id: i64,
        kind: CollectionKind,
    ) -> Result<Vec<LedgerRecord>, AppError> {
        if let Actor::Candidate { candidate, .. } = actor {
            if candidate.id != candidate_id {
                warn!(
                    user_id = actor.user().id,
                    candidate_id,
                    "Candidate attempted to read another candidate's records"
                );
                return Err(AppError::forbidden(
                    "Candidates may only view their own records",
                ));
            }
        }
        for_kind!(kind, self.list_in(candidate_id))
    }

    async fn verify_in<T: Verifiable>(
        &self,
        recruiter_id: i64,
        candidate_id: i64,
        sub_record_id: Uuid,
    ) -> Result<VerifyOutcome, AppError> {
        let now = self.clock.now();
        let mut outcome = VerifyOutcome::AlreadyVerified;

        self.candidates
            .mutate_collection(candidate_id, T::KIND, &mut |current: Value| {
                let mut records = decode_collection::<T>(&current)?;
                let record = find_record(&mut records, sub_record_id)?;

                if record.is_verified_by(recruiter_id) {
                    outcome = VerifyOutcome::AlreadyVerified;
                    return Ok(None);
                }

                record
                    .verifications_mut()
                    .push(VerificationDetail::new(recruiter_id, now));
                outcome = VerifyOutcome::Verified;
                encode_collection(&records).map(Some)
            })
            .await?;

        Ok(outcome)
    }

    async fn unverify_in<T: Verifiable>(
        &self,
        recruiter_id: i64,
        candidate_id: i64,
        sub_record_id: Uuid,
    ) -> Result<UnverifyOutcome, AppError> {
        let mut outcome = UnverifyOutcome::NoChange;

        self.candidates
            .mutate_collection(candidate_id, T::KIND, &mut |current: Value| {
                let mut records = decode_collection::<T>(&current)?;
                let record = find_record(&mut records, sub_record_id)?;

                let before = record.verifications().len();
                record
                    .verifications_mut()
                    .retain(|v| v.recruiter_id != recruiter_id);

                if record.verifications().len() == before {
                    outcome = UnverifyOutcome::NoChange;
                    return Ok(None);
                }

                outcome = UnverifyOutcome::Removed;
                encode_collection(&records).map(Some)
            })
            .await?;

        Ok(outcome)
    }

    async fn list_in<T: Verifiable>(&self, candidate_id: i64) -> Result<Vec<LedgerRecord>, AppError> {
        let raw = self
            .candidates
            .load_collection(candidate_id, T::KIND)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Candidate {candidate_id} not found")))?;
        let records = decode_collection::<T>(&raw)?;

        let recruiter_ids: BTreeSet<i64> = records
            .iter()
            .flat_map(|r| r.verifications().iter().map(|v| v.recruiter_id))
            .collect();
        let ids: Vec<i64> = recruiter_ids.into_iter().collect();
        let names: HashMap<i64, Option<String>> = self
            .users
            .find_recruiter_names(&ids)
            .await?
            .into_iter()
            .map(|r| (r.id, r.full_name()))
            .collect();

        records
            .iter()
            .map(|record| -> Result<LedgerRecord, AppError> {
                let verifications = record
                    .verifications()
                    .iter()
                    .map(|v| LedgerVerification {
                        recruiter_id: v.recruiter_id,
                        verified_at: v.verified_at,
                        recruiter_name: names.get(&v.recruiter_id).cloned().flatten(),
                    })
                    .collect();

                let mut fields = match serde_json::to_value(record)? {
                    Value::Object(map) => map,
                    _ => return Err(AppError::internal("Sub-record did not serialize to an object")),
                };
                fields.remove("verifications");

                Ok(LedgerRecord {
                    fields,
                    verifications,
                })
            })
            .collect()
    }
}

/// The recruiter profile id of `actor`, or `Forbidden`.
fn require_recruiter(actor: &Actor, operation: &str) -> Result<i64, AppError> {
    match actor.recruiter() {
        Some(recruiter) => Ok(recruiter.id),
        None => {
            warn!(user_id = actor.user().id, operation, "Non-recruiter attempted a ledger write");
            Err(AppError::forbidden(format!("Only recruiters can {operation} records")))
        }
    }
}

fn find_record<T: Verifiable>(records: &mut [T], id: Uuid) -> Result<&mut T, AppError> {
    records.iter_mut().find(|r| r.id() == id).ok_or_else(|| {
        AppError::not_found(format!("{} entry {id} not found", T::KIND.entry_label()))
    })
}
