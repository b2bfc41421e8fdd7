//! High-level database service layer.
//!
//! Repository-agnostic operations over the people collection. Payload
//! validation happens here, before anything reaches a backend, so every
//! repository implementation sees the same rules.
//!
//! # Usage
//!
//! ```no_run
//! use people_api::db::{services, repositories::LocalRepository};
//! use people_api::models::PersonDraft;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!
//!     let person = services::create_person(&repo, PersonDraft::new("Ada", 36.0)).await?;
//!     let people = services::list_people(&repo).await?;
//!     println!("{} stored, first is {}", people.len(), person.id);
//!
//!     Ok(())
//! }
//! ```

use log::{debug, info, warn};

use super::repository::{PersonRepository, RepositoryError, RepositoryResult};
use crate::models::{Person, PersonDraft, PersonId, PersonPatch};

// ==================== Health & Connection ====================

/// Check if the database connection is healthy.
pub async fn health_check(repo: &dyn PersonRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Person Operations ====================

/// Validate a creation payload and store it.
///
/// # Returns
/// * `Ok(Person)` - The stored person with its generated identifier
/// * `Err(RepositoryError::ValidationError)` - If `name` or `age` is missing or invalid
/// * `Err(RepositoryError)` - If the store fails
pub async fn create_person(
    repo: &dyn PersonRepository,
    draft: PersonDraft,
) -> RepositoryResult<Person> {
    let new_person = draft.validate().map_err(|e| {
        debug!("Rejected person draft: {}", e);
        RepositoryError::from(e).with_operation("create_person")
    })?;

    let person = repo.insert_person(new_person).await?;
    info!("Created person {} ({})", person.id, person.name);
    Ok(person)
}

/// List every person in storage order.
pub async fn list_people(repo: &dyn PersonRepository) -> RepositoryResult<Vec<Person>> {
    repo.list_people().await.map_err(|e| {
        warn!("Failed to list people: {}", e);
        e
    })
}

/// Fetch one person by identifier.
pub async fn get_person(repo: &dyn PersonRepository, id: &PersonId) -> RepositoryResult<Person> {
    repo.get_person(id).await
}

/// Apply a partial update.
///
/// An empty patch is not an error: the stored record is returned unchanged,
/// after confirming it exists.
pub async fn update_person(
    repo: &dyn PersonRepository,
    id: &PersonId,
    patch: PersonPatch,
) -> RepositoryResult<Person> {
    if patch.is_empty() {
        return repo.get_person(id).await;
    }

    let person = repo.update_person(id, &patch).await?;
    info!("Updated person {}", person.id);
    Ok(person)
}

/// Delete one person.
pub async fn delete_person(repo: &dyn PersonRepository, id: &PersonId) -> RepositoryResult<()> {
    repo.delete_person(id).await?;
    info!("Deleted person {}", id);
    Ok(())
}
