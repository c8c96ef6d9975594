//! # Board Infrastructure
//!
//! Concrete implementations of the repository ports defined in `board-core`.
//!
//! ## Feature Flags
//!
//! - `database` (default) - SQL storage via SeaORM (Postgres, SQLite)
//!
//! The in-memory store is always available and needs no external services.

pub mod database;

pub use database::{DatabaseConfig, InMemoryAuthorRepository, InMemoryPostRepository, InMemoryStore};

#[cfg(feature = "database")]
pub use database::{DatabaseConnections, SqlAuthorRepository, SqlPostRepository};
