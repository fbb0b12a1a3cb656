//! HTTP request handlers, one module per route group.

pub mod auth;
pub mod candidates;
pub mod health;
