//! # hirevault-auth
//!
//! Credentials for the HireVault platform.
//!
//! ## Modules
//!
//! - `token` - signed claim sets (codec) and the pure issue/validate service
//! - `password` - Argon2id password hashing
//! - `session` - refresh-token sessions, login, refresh and logout
//! - `identity` - turning a validated access token into an [`Actor`]

pub mod identity;
pub mod password;
pub mod session;
pub mod token;

pub use identity::{Actor, IdentityResolver};
pub use password::PasswordHasher;
pub use session::{LoginResult, RefreshResult, SessionManager, SessionStore};
pub use token::{DecodeError, Payload, TokenCodec, TokenService, TokenType};
