//! Core people repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewPerson, Person, PersonId, PersonPatch};

/// Repository trait for the people collection.
///
/// Implementations own identifier and timestamp generation: callers hand in a
/// validated [`NewPerson`] and get back the stored [`Person`].
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Check if the database connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Persist a new person with a generated identifier and the current time.
    async fn insert_person(&self, person: NewPerson) -> RepositoryResult<Person>;

    /// List every stored person in storage order.
    async fn list_people(&self) -> RepositoryResult<Vec<Person>>;

    /// Fetch one person.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no person has this identifier
    async fn get_person(&self, id: &PersonId) -> RepositoryResult<Person>;

    /// Apply a partial update and return the stored result.
    ///
    /// Fields absent from `patch` keep their stored value. The merged record
    /// is validated before it is written.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no person has this identifier
    /// * `Err(RepositoryError::ValidationError)` - If the merged record is invalid
    async fn update_person(&self, id: &PersonId, patch: &PersonPatch) -> RepositoryResult<Person>;

    /// Remove a person.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no person has this identifier
    async fn delete_person(&self, id: &PersonId) -> RepositoryResult<()>;
}
