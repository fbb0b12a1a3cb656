//! # hirevault-entity
//!
//! Domain entity models for HireVault. Database rows derive `sqlx::FromRow`;
//! candidate sub-records are JSON documents embedded in the candidate row
//! and are modelled by the [`verification`] module.

pub mod candidate;
pub mod recruiter;
pub mod session;
pub mod user;
pub mod verification;
