//! Todo repository.

use async_trait::async_trait;
use uuid::Uuid;

use super::MemoryStore;
use common::AppResult;
use domain::{Todo, TodoFilter, TodoPatch};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Todo repository trait for dependency injection.
///
/// Update, toggle and delete on an unknown id are no-ops, reported as
/// `None` / `false` rather than errors.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Matching todos, most recent first
    async fn list(&self, filter: TodoFilter) -> AppResult<Vec<Todo>>;

    /// Whole collection, for statistics
    async fn all(&self) -> AppResult<Vec<Todo>>;

    /// Store a validated todo at the head of the collection
    async fn insert(&self, todo: Todo) -> AppResult<Todo>;

    async fn update(&self, id: Uuid, patch: TodoPatch) -> AppResult<Option<Todo>>;

    async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Todo>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
impl TodoRepository for MemoryStore<Todo> {
    async fn list(&self, filter: TodoFilter) -> AppResult<Vec<Todo>> {
        Ok(MemoryStore::list(self, &filter).await)
    }

    async fn all(&self) -> AppResult<Vec<Todo>> {
        Ok(MemoryStore::all(self).await)
    }

    async fn insert(&self, todo: Todo) -> AppResult<Todo> {
        Ok(MemoryStore::insert(self, todo).await)
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> AppResult<Option<Todo>> {
        Ok(MemoryStore::update(self, id, patch).await)
    }

    async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Todo>> {
        Ok(MemoryStore::toggle_status(self, id).await)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(MemoryStore::delete(self, id).await)
    }
}
