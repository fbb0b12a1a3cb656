//! Recruiter domain entities.

pub mod model;

pub use model::{Recruiter, RecruiterName};
