//! Todo and reminder handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{
    Action, Module, NewTodo, Priority, Todo, TodoFilter, TodoKind, TodoPatch, TodoStats,
    TodoStatus,
};

use super::json_or_no_content;
use crate::extractors::ValidatedJson;
use crate::middleware::{require_permission, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TodoQuery {
    /// Case-insensitive match on title, description or client name
    pub search: Option<String>,
    /// `en_attente`, `en_cours` or `termine`
    #[param(value_type = Option<String>)]
    pub status: Option<TodoStatus>,
    /// `faible`, `normale`, `haute` or `urgente`
    #[param(value_type = Option<String>)]
    pub priority: Option<Priority>,
}

impl From<TodoQuery> for TodoFilter {
    fn from(query: TodoQuery) -> Self {
        Self {
            search: query.search,
            status: query.status,
            priority: query.priority,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Rappeler M. Durand")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    /// Required; RFC 3339
    pub due_at: Option<DateTime<Utc>>,
    /// Defaults to `normale`
    #[serde(default)]
    pub priority: Priority,
    /// Defaults to `tache`
    #[serde(default)]
    pub kind: TodoKind,
    pub assignee: Option<String>,
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(request: CreateTodoRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            client_id: request.client_id,
            client_name: request.client_name,
            due_at: request.due_at,
            priority: request.priority,
            kind: request.kind,
            assignee: request.assignee,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
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

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            client_id: request.client_id,
            client_name: request.client_name,
            due_at: request.due_at,
            priority: request.priority,
            status: request.status,
            kind: request.kind,
            assignee: request.assignee,
        }
    }
}

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/stats", get(todo_stats))
        .route("/:id", put(update_todo).delete(delete_todo))
        .route("/:id/toggle-status", post(toggle_todo_status))
}

/// List todos, most recent first
#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(TodoQuery),
    responses(
        (status = 200, description = "Matching todos", body = Vec<Todo>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_todos(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<TodoQuery>,
) -> AppResult<Json<Vec<Todo>>> {
    require_permission(&current_user, Module::Todos, Action::Read)?;
    Ok(Json(state.todo_client.list(query.into()).await?))
}

/// Create a pending todo
#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    security(("bearer_auth" = [])),
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Missing title or due date"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_todo(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    require_permission(&current_user, Module::Todos, Action::Create)?;
    let todo = state.todo_client.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Update a todo; omitted fields are kept
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 204, description = "No todo with this id; nothing changed"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn update_todo(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTodoRequest>,
) -> AppResult<Response> {
    require_permission(&current_user, Module::Todos, Action::Update)?;
    let todo = state.todo_client.update(id, payload.into()).await?;
    Ok(json_or_no_content(todo))
}

/// Advance the status: en_attente, en_cours, termine, then back
#[utoipa::path(
    post,
    path = "/todos/{id}/toggle-status",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Status advanced", body = Todo),
        (status = 204, description = "No todo with this id; nothing changed"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn toggle_todo_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    require_permission(&current_user, Module::Todos, Action::Update)?;
    let todo = state.todo_client.toggle_status(id).await?;
    Ok(json_or_no_content(todo))
}

/// Delete a todo; unknown ids are ignored
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Todo ID")),
    responses(
        (status = 204, description = "Todo deleted or already absent"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn delete_todo(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_permission(&current_user, Module::Todos, Action::Delete)?;
    if !state.todo_client.delete(id).await? {
        debug!("Delete of unknown todo {} ignored", id);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Counters by status, plus overdue
#[utoipa::path(
    get,
    path = "/todos/stats",
    tag = "Todos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Todo counters", body = TodoStats),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn todo_stats(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<TodoStats>> {
    require_permission(&current_user, Module::Todos, Action::Read)?;
    Ok(Json(state.todo_client.stats().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let request: CreateTodoRequest = serde_json::from_value(serde_json::json!({
            "title": "Envoyer le devis",
            "due_at": "2024-03-05T17:00:00Z"
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let draft = NewTodo::from(request);
        assert_eq!(draft.priority, Priority::Normal);
        assert_eq!(draft.kind, TodoKind::Task);
        assert!(draft.due_at.is_some());
        assert!(draft.description.is_empty());
    }

    #[test]
    fn test_create_request_reads_wire_ids() {
        let request: CreateTodoRequest = serde_json::from_value(serde_json::json!({
            "title": "Rappel paiement",
            "due_at": "2024-03-05T17:00:00Z",
            "priority": "urgente",
            "kind": "rappel",
            "client_name": "Famille Durand"
        }))
        .unwrap();

        assert_eq!(request.priority, Priority::Urgent);
        assert_eq!(request.kind, TodoKind::Reminder);
        assert_eq!(request.client_name.as_deref(), Some("Famille Durand"));
    }

    #[test]
    fn test_missing_due_date_is_left_to_the_service() {
        let request: CreateTodoRequest =
            serde_json::from_value(serde_json::json!({ "title": "Sans échéance" })).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(NewTodo::from(request).due_at, None);
    }

    #[test]
    fn test_update_request_can_set_status() {
        let request: UpdateTodoRequest =
            serde_json::from_value(serde_json::json!({ "status": "termine" })).unwrap();
        let patch = TodoPatch::from(request);

        assert_eq!(patch.status, Some(TodoStatus::Done));
        assert_eq!(patch.title, None);
    }

    #[test]
    fn test_blank_title_fails_validation() {
        let request: UpdateTodoRequest =
            serde_json::from_value(serde_json::json!({ "title": "" })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_query_filters() {
        let query: TodoQuery = serde_json::from_value(serde_json::json!({
            "status": "en_cours",
            "priority": "haute"
        }))
        .unwrap();
        let filter = TodoFilter::from(query);

        assert_eq!(filter.status, Some(TodoStatus::InProgress));
        assert_eq!(filter.priority, Some(Priority::High));
    }
}
