//! Recruiter attestations on candidate sub-records.

pub mod ledger;
pub mod outcome;

pub use ledger::VerificationLedger;
pub use outcome::{LedgerRecord, LedgerVerification, UnverifyOutcome, VerifyOutcome};
