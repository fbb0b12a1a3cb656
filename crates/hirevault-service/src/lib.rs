//! # hirevault-service
//!
//! Business logic for HireVault. Services take their repositories and the
//! clock through constructor injection as `Arc` references.

pub mod verification;

pub use verification::{
    LedgerRecord, LedgerVerification, UnverifyOutcome, VerificationLedger, VerifyOutcome,
};
