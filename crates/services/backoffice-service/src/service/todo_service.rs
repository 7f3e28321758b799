//! Todo service - reminders, tasks and client follow-ups.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use common::AppResult;
use domain::{NewTodo, Todo, TodoFilter, TodoPatch, TodoStats};

use crate::repository::TodoRepository;

/// Todo service trait for dependency injection.
#[async_trait]
pub trait TodoService: Send + Sync {
    async fn list_todos(&self, filter: TodoFilter) -> AppResult<Vec<Todo>>;

    /// Validate and store a new pending todo.
    async fn create_todo(&self, input: NewTodo) -> AppResult<Todo>;

    /// `None` when no todo has `id`.
    async fn update_todo(&self, id: Uuid, patch: TodoPatch) -> AppResult<Option<Todo>>;

    /// Advance the status cycle.
    async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Todo>>;

    /// Idempotent; reports whether a todo was removed.
    async fn delete_todo(&self, id: Uuid) -> AppResult<bool>;

    /// Counters as of `now`.
    async fn stats(&self, now: DateTime<Utc>) -> AppResult<TodoStats>;
}

pub struct TodoManager {
    repo: Arc<dyn TodoRepository>,
}

impl TodoManager {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TodoService for TodoManager {
    async fn list_todos(&self, filter: TodoFilter) -> AppResult<Vec<Todo>> {
        self.repo.list(filter).await
    }

    async fn create_todo(&self, input: NewTodo) -> AppResult<Todo> {
        let todo = Todo::create(input, Uuid::new_v4(), Utc::now())?;
        let todo = self.repo.insert(todo).await?;
        info!("Todo {} created", todo.id);
        Ok(todo)
    }

    async fn update_todo(&self, id: Uuid, patch: TodoPatch) -> AppResult<Option<Todo>> {
        let patch = patch.validate()?;
        let updated = self.repo.update(id, patch).await?;
        if updated.is_none() {
            debug!("Update of unknown todo {} ignored", id);
        }
        Ok(updated)
    }

    async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Todo>> {
        let toggled = self.repo.toggle_status(id).await?;
        if let Some(todo) = &toggled {
            debug!("Todo {} moved to {}", todo.id, todo.status.as_str());
        }
        Ok(toggled)
    }

    async fn delete_todo(&self, id: Uuid) -> AppResult<bool> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!("Todo {} deleted", id);
        }
        Ok(deleted)
    }

    async fn stats(&self, now: DateTime<Utc>) -> AppResult<TodoStats> {
        let todos = self.repo.all().await?;
        Ok(TodoStats::from_todos(&todos, now))
    }
}
