//! In-memory local repository implementation.
//!
//! Stores people in a `Vec` behind a read/write lock, which keeps insertion
//! order for listings and makes tests fast, deterministic and isolated.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::{ErrorContext, PersonRepository, RepositoryError, RepositoryResult};
use crate::models::{NewPerson, Person, PersonId, PersonPatch};

/// In-memory local repository.
///
/// # Example
/// ```
/// use people_api::db::repositories::LocalRepository;
/// use people_api::db::repository::PersonRepository;
/// use people_api::models::PersonDraft;
///
/// # tokio_test_block_on(async {
/// let repo = LocalRepository::new();
/// let new_person = PersonDraft::new("Ada", 36.0).validate().unwrap();
/// repo.insert_person(new_person).await.unwrap();
///
/// let people = repo.list_people().await.unwrap();
/// assert_eq!(people.len(), 1);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    people: Vec<Person>,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            people: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy every operation fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        self.data.write().people.clear();
    }

    /// Get the number of people stored.
    pub fn person_count(&self) -> usize {
        self.data.read().people.len()
    }

    fn ensure_healthy(data: &LocalData, operation: &str) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Local repository is unavailable",
                ErrorContext::new(operation).with_entity("person"),
            ))
        }
    }

    fn not_found(operation: &str, id: &PersonId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Person {} not found", id),
            ErrorContext::new(operation)
                .with_entity("person")
                .with_entity_id(id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_person(&self, person: NewPerson) -> RepositoryResult<Person> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "insert_person")?;

        let person = person.into_person(PersonId::generate(), Utc::now());
        debug!("Storing person {} in local repository", person.id);
        data.people.push(person.clone());
        Ok(person)
    }

    async fn list_people(&self) -> RepositoryResult<Vec<Person>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "list_people")?;
        Ok(data.people.clone())
    }

    async fn get_person(&self, id: &PersonId) -> RepositoryResult<Person> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "get_person")?;
        data.people
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("get_person", id))
    }

    async fn update_person(&self, id: &PersonId, patch: &PersonPatch) -> RepositoryResult<Person> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "update_person")?;

        let slot = data
            .people
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| Self::not_found("update_person", id))?;

        let updated = patch
            .apply(slot)
            .map_err(|e| RepositoryError::from(e).with_operation("update_person"))?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_person(&self, id: &PersonId) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "delete_person")?;

        let index = data
            .people
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| Self::not_found("delete_person", id))?;
        data.people.remove(index);
        debug!("Deleted person {} from local repository", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonDraft;

    fn draft(name: &str, age: f64) -> NewPerson {
        PersonDraft::new(name, age).validate().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_identity() {
        let repo = LocalRepository::new();
        let person = repo.insert_person(draft("Ada", 36.0)).await.unwrap();
        assert!(!person.id.as_str().is_empty());
        assert_eq!(person.name, "Ada");
        assert_eq!(repo.person_count(), 1);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repo = LocalRepository::new();
        let first = repo.insert_person(draft("First", 1.0)).await.unwrap();
        let second = repo.insert_person(draft("Second", 2.0)).await.unwrap();
        let third = repo.insert_person(draft("Third", 3.0)).await.unwrap();

        let ids: Vec<PersonId> = repo
            .list_people()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_operations() {
        let repo = LocalRepository::new();
        let person = repo.insert_person(draft("Ada", 36.0)).await.unwrap();
        repo.set_healthy(false);

        assert!(!repo.health_check().await.unwrap());
        let err = repo.get_person(&person.id).await.unwrap_err();
        assert!(err.is_store_unavailable());
        assert!(repo.list_people().await.unwrap_err().is_store_unavailable());

        repo.set_healthy(true);
        assert!(repo.get_person(&person.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_update_leaves_record_untouched() {
        let repo = LocalRepository::new();
        let person = repo.insert_person(draft("Ada", 36.0)).await.unwrap();

        let err = repo
            .update_person(&person.id, &PersonPatch::name(" "))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.get_person(&person.id).await.unwrap(), person);
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = LocalRepository::new();
        repo.insert_person(draft("Ada", 36.0)).await.unwrap();
        repo.clear();
        assert_eq!(repo.person_count(), 0);
    }
}
