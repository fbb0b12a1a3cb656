//! # hirevault-api
//!
//! HTTP API layer for HireVault built on Axum. Routes are mounted under
//! `/api`; handlers receive [`AppState`] through the `State` extractor and
//! authenticate callers with the [`extractors::AuthUser`] extractor.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
