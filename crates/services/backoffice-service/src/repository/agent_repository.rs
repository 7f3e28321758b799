//! Agent repository.

use async_trait::async_trait;
use uuid::Uuid;

use super::MemoryStore;
use common::AppResult;
use domain::{Agent, AgentFilter, AgentPatch};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Agent repository trait for dependency injection.
///
/// Update, toggle and delete on an unknown id are no-ops, reported as
/// `None` / `false` rather than errors.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Matching agents, most recent first
    async fn list(&self, filter: AgentFilter) -> AppResult<Vec<Agent>>;

    /// Whole collection, for statistics
    async fn all(&self) -> AppResult<Vec<Agent>>;

    /// Store a validated agent at the head of the collection
    async fn insert(&self, agent: Agent) -> AppResult<Agent>;

    async fn update(&self, id: Uuid, patch: AgentPatch) -> AppResult<Option<Agent>>;

    async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Agent>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
impl AgentRepository for MemoryStore<Agent> {
    async fn list(&self, filter: AgentFilter) -> AppResult<Vec<Agent>> {
        Ok(MemoryStore::list(self, &filter).await)
    }

    async fn all(&self) -> AppResult<Vec<Agent>> {
        Ok(MemoryStore::all(self).await)
    }

    async fn insert(&self, agent: Agent) -> AppResult<Agent> {
        Ok(MemoryStore::insert(self, agent).await)
    }

    async fn update(&self, id: Uuid, patch: AgentPatch) -> AppResult<Option<Agent>> {
        Ok(MemoryStore::update(self, id, patch).await)
    }

    async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Agent>> {
        Ok(MemoryStore::toggle_status(self, id).await)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(MemoryStore::delete(self, id).await)
    }
}
