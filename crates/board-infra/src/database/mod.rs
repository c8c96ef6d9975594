//! Storage backends and connection management.

mod connections;
mod memory;

#[cfg(feature = "database")]
pub mod entity;
#[cfg(feature = "database")]
mod sql_base;
#[cfg(feature = "database")]
mod sql_repo;

pub use connections::DatabaseConfig;
pub use memory::{InMemoryAuthorRepository, InMemoryPostRepository, InMemoryStore};

#[cfg(feature = "database")]
pub use connections::DatabaseConnections;
#[cfg(feature = "database")]
pub use sql_repo::{SqlAuthorRepository, SqlPostRepository};

#[cfg(feature = "database")]
#[cfg(test)]
mod tests;
