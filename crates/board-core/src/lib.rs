//! # Board Core
//!
//! The domain layer of the bulletin board.
//! Entities, repository ports and form validation, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod form;
pub mod ports;

pub use error::{DomainError, RepoError};
