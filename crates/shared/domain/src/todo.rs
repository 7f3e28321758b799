//! Todo entity: reminders, tasks and client follow-ups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{filled_patch, require_filled, DomainError, DomainResult};
use crate::record::{contains_ci, non_blank, search_term, Record};

/// Todo progress. Toggling walks the cycle and wraps from done to pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum TodoStatus {
    #[default]
    #[serde(rename = "en_attente")]
    Pending,
    #[serde(rename = "en_cours")]
    InProgress,
    #[serde(rename = "termine")]
    Done,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 3] = [TodoStatus::Pending, TodoStatus::InProgress, TodoStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "en_attente",
            TodoStatus::InProgress => "en_cours",
            TodoStatus::Done => "termine",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TodoStatus::Pending => TodoStatus::InProgress,
            TodoStatus::InProgress => TodoStatus::Done,
            TodoStatus::Done => TodoStatus::Pending,
        }
    }
}

impl FromStr for TodoStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TodoStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::unknown("todo status", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Priority {
    #[serde(rename = "faible")]
    Low,
    #[default]
    #[serde(rename = "normale")]
    Normal,
    #[serde(rename = "haute")]
    High,
    #[serde(rename = "urgente")]
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Normal, Priority::High, Priority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "faible",
            Priority::Normal => "normale",
            Priority::High => "haute",
            Priority::Urgent => "urgente",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| DomainError::unknown("priority", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum TodoKind {
    #[serde(rename = "rappel")]
    Reminder,
    #[default]
    #[serde(rename = "tache")]
    Task,
    #[serde(rename = "suivi")]
    FollowUp,
}

impl TodoKind {
    pub const ALL: [TodoKind; 3] = [TodoKind::Reminder, TodoKind::Task, TodoKind::FollowUp];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoKind::Reminder => "rappel",
            TodoKind::Task => "tache",
            TodoKind::FollowUp => "suivi",
        }
    }
}

impl FromStr for TodoKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TodoKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::unknown("todo kind", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub due_at: DateTime<Utc>,
    pub priority: Priority,
    pub status: TodoStatus,
    pub kind: TodoKind,
    pub created_at: DateTime<Utc>,
    pub assignee: Option<String>,
}

/// Todo creation input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub kind: TodoKind,
    pub assignee: Option<String>,
}

impl Todo {
    /// Build a new pending todo.
    ///
    /// # Errors
    /// Validation error when the title is blank or the due date missing.
    pub fn create(draft: NewTodo, id: Uuid, created_at: DateTime<Utc>) -> DomainResult<Self> {
        require_filled("Title", &draft.title)?;
        let due_at = draft
            .due_at
            .ok_or_else(|| DomainError::validation("Due date is required"))?;

        Ok(Self {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            client_id: non_blank(draft.client_id),
            client_name: non_blank(draft.client_name),
            due_at,
            priority: draft.priority,
            status: TodoStatus::Pending,
            kind: draft.kind,
            created_at,
            assignee: non_blank(draft.assignee),
        })
    }

    /// Past its due date and not done.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TodoStatus::Done && self.due_at < now
    }
}

/// Partial todo update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub status: Option<TodoStatus>,
    pub kind: Option<TodoKind>,
    pub assignee: Option<String>,
}

impl TodoPatch {
    /// The title may be omitted but not blanked.
    pub fn validate(mut self) -> DomainResult<Self> {
        self.title = filled_patch("Title", self.title)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    /// Matched against title, description and client name.
    pub search: Option<String>,
    pub status: Option<TodoStatus>,
    pub priority: Option<Priority>,
}

impl Record for Todo {
    type Filter = TodoFilter;
    type Patch = TodoPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn matches(&self, filter: &TodoFilter) -> bool {
        let matches_search = match search_term(&filter.search) {
            Some(term) => {
                contains_ci(&self.title, &term)
                    || contains_ci(&self.description, &term)
                    || self
                        .client_name
                        .as_deref()
                        .is_some_and(|name| contains_ci(name, &term))
            }
            None => true,
        };
        matches_search
            && filter.status.map_or(true, |status| self.status == status)
            && filter.priority.map_or(true, |priority| self.priority == priority)
    }

    fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if patch.client_id.is_some() {
            self.client_id = non_blank(patch.client_id);
        }
        if patch.client_name.is_some() {
            self.client_name = non_blank(patch.client_name);
        }
        if let Some(due_at) = patch.due_at {
            self.due_at = due_at;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if patch.assignee.is_some() {
            self.assignee = non_blank(patch.assignee);
        }
    }

    fn toggle_status(&mut self) {
        self.status = self.status.next();
    }
}

/// Counters shown above the todo list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TodoStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
    pub overdue: usize,
}

impl TodoStats {
    pub fn from_todos(todos: &[Todo], now: DateTime<Utc>) -> Self {
        let count = |status: TodoStatus| todos.iter().filter(|t| t.status == status).count();
        Self {
            total: todos.len(),
            pending: count(TodoStatus::Pending),
            in_progress: count(TodoStatus::InProgress),
            done: count(TodoStatus::Done),
            overdue: todos.iter().filter(|t| t.is_overdue(now)).count(),
        }
    }
}
