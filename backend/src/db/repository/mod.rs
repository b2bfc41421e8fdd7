//! Repository trait definitions for database operations.
//!
//! - [`error`]: Error types for repository operations
//! - [`person`]: CRUD operations over the people collection
//!
//! Implementations live in [`crate::db::repositories`].

pub mod error;
pub mod person;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use person::PersonRepository;
