//! Custom Axum extractors.

pub mod auth;
pub mod client;
pub mod path;

pub use auth::AuthUser;
pub use client::ClientInfo;
