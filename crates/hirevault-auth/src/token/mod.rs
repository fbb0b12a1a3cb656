//! Signed, typed session tokens.

pub mod codec;
pub mod payload;
pub mod service;

pub use codec::{DecodeError, TokenCodec};
pub use payload::{Payload, TokenType};
pub use service::{TokenPolicy, TokenService};
