//! Caller identity.

pub mod actor;
pub mod resolver;

pub use actor::Actor;
pub use resolver::IdentityResolver;
