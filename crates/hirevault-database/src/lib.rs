//! # hirevault-database
//!
//! Repository traits for users, sessions and candidates, with a PostgreSQL
//! implementation over `sqlx` and an in-memory implementation used by tests
//! and by `database.provider = "memory"`.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::InMemoryDatabase;
pub use provider::Repositories;
pub use repositories::{CandidateRepository, CollectionMutation, SessionRepository, UserRepository};
