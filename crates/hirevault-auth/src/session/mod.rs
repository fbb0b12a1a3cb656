//! Refresh-token sessions.

pub mod manager;
pub mod store;

pub use manager::{LoginResult, RefreshResult, SessionManager};
pub use store::SessionStore;
