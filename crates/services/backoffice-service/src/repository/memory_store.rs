//! In-memory collection store.
//!
//! One `Vec` per collection behind a `tokio::sync::RwLock`, most recent
//! entity first. Each mutation runs under a single write guard, so a call
//! either applies entirely or leaves the collection as it was. Not durable.

use tokio::sync::RwLock;
use uuid::Uuid;

use domain::Record;

pub struct MemoryStore<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Start from existing items, kept in the given order.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub async fn list(&self, filter: &T::Filter) -> Vec<T> {
        let items = self.items.read().await;
        items.iter().filter(|item| item.matches(filter)).cloned().collect()
    }

    pub async fn all(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Prepend a new item.
    pub async fn insert(&self, item: T) -> T {
        let mut items = self.items.write().await;
        items.insert(0, item.clone());
        item
    }

    /// Patch the item with `id`; `None` when there is none.
    pub async fn update(&self, id: Uuid, patch: T::Patch) -> Option<T> {
        self.modify(id, |item| item.apply(patch)).await
    }

    pub async fn toggle_status(&self, id: Uuid) -> Option<T> {
        self.modify(id, T::toggle_status).await
    }

    /// Remove the item with `id`; reports whether anything was removed.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id() != id);
        items.len() != before
    }

    async fn modify(&self, id: Uuid, change: impl FnOnce(&mut T)) -> Option<T> {
        let mut items = self.items.write().await;
        let item = items.iter_mut().find(|item| item.id() == id)?;
        change(item);
        Some(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{Agent, AgentFilter, AgentPatch, AgentStatus, NewAgent};

    fn agent(last_name: &str) -> Agent {
        Agent::create(
            NewAgent {
                last_name: last_name.to_string(),
                first_name: "Test".to_string(),
                email: format!("{}@agence.com", last_name.to_lowercase()),
                ..NewAgent::default()
            },
            Uuid::new_v4(),
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_prepends() {
        let store = MemoryStore::with_items(vec![agent("Martin")]);
        store.insert(agent("Dubois")).await;

        let names: Vec<String> = store.all().await.into_iter().map(|a| a.last_name).collect();
        assert_eq!(names, vec!["Dubois", "Martin"]);
    }

    #[tokio::test]
    async fn test_missing_id_is_a_no_op() {
        let store = MemoryStore::with_items(vec![agent("Martin")]);
        let before = store.all().await;

        assert!(store.update(Uuid::new_v4(), AgentPatch::default()).await.is_none());
        assert!(store.toggle_status(Uuid::new_v4()).await.is_none());
        assert!(!store.delete(Uuid::new_v4()).await);
        assert_eq!(store.all().await, before);
    }

    #[tokio::test]
    async fn test_toggle_returns_updated_item() {
        let martin = agent("Martin");
        let store = MemoryStore::with_items(vec![martin.clone()]);

        let toggled = store.toggle_status(martin.id).await.unwrap();
        assert_eq!(toggled.status, AgentStatus::Suspended);

        let suspended = store
            .list(&AgentFilter {
                search: None,
                status: Some(AgentStatus::Suspended),
            })
            .await;
        assert_eq!(suspended.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes() {
        let martin = agent("Martin");
        let store = MemoryStore::with_items(vec![martin.clone(), agent("Leroy")]);

        assert!(store.delete(martin.id).await);
        assert_eq!(store.len().await, 1);
        assert!(!store.delete(martin.id).await);
    }
}
