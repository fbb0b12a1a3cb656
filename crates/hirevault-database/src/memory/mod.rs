//! In-memory repositories.
//!
//! One [`InMemoryDatabase`] implements every repository trait over a single
//! `tokio::sync::Mutex`, so a collection mutation excludes every other
//! access for its whole duration. Data lives only as long as the process.

mod store;

pub use store::InMemoryDatabase;
