//! gRPC client for the todo side of backoffice-service.

use tonic::transport::Channel;
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{NewTodo, Todo, TodoFilter, TodoPatch, TodoStats};
use proto::backoffice::{
    todo_service_client::TodoServiceClient as ProtoTodoServiceClient, CreateTodoRequest,
    IdRequest, ListTodosRequest, MaybeTodo, StatsRequest, UpdateTodoRequest,
};

use super::convert::todo_from_proto;

pub struct TodoClient {
    client: ProtoTodoServiceClient<Channel>,
}

fn maybe_todo(reply: MaybeTodo) -> AppResult<Option<Todo>> {
    reply.todo.map(todo_from_proto).transpose()
}

impl TodoClient {
    pub fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to todo service at {}", config.endpoint);
        let channel = super::convert::channel(config)?;
        Ok(Self {
            client: ProtoTodoServiceClient::new(channel),
        })
    }

    pub async fn list(&self, filter: TodoFilter) -> AppResult<Vec<Todo>> {
        let request = tonic::Request::new(ListTodosRequest {
            search: filter.search,
            status: filter.status.map(|s| s.as_str().to_string()),
            priority: filter.priority.map(|p| p.as_str().to_string()),
        });

        let mut client = self.client.clone();
        let response = client.list_todos(request).await.map_err(AppError::from)?;
        response
            .into_inner()
            .todos
            .into_iter()
            .map(todo_from_proto)
            .collect()
    }

    pub async fn create(&self, draft: NewTodo) -> AppResult<Todo> {
        let request = tonic::Request::new(CreateTodoRequest {
            title: draft.title,
            description: draft.description,
            client_id: draft.client_id,
            client_name: draft.client_name,
            due_at: draft.due_at.map(|due| due.to_rfc3339()),
            priority: Some(draft.priority.as_str().to_string()),
            kind: Some(draft.kind.as_str().to_string()),
            assignee: draft.assignee,
        });

        let mut client = self.client.clone();
        let response = client.create_todo(request).await.map_err(AppError::from)?;
        todo_from_proto(response.into_inner())
    }

    pub async fn update(&self, id: Uuid, patch: TodoPatch) -> AppResult<Option<Todo>> {
        let request = tonic::Request::new(UpdateTodoRequest {
            id: id.to_string(),
            title: patch.title,
            description: patch.description,
            client_id: patch.client_id,
            client_name: patch.client_name,
            due_at: patch.due_at.map(|due| due.to_rfc3339()),
            priority: patch.priority.map(|p| p.as_str().to_string()),
            status: patch.status.map(|s| s.as_str().to_string()),
            kind: patch.kind.map(|k| k.as_str().to_string()),
            assignee: patch.assignee,
        });

        let mut client = self.client.clone();
        let response = client.update_todo(request).await.map_err(AppError::from)?;
        maybe_todo(response.into_inner())
    }

    /// Advance the todo one step along its status cycle.
    pub async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Todo>> {
        let request = tonic::Request::new(IdRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client
            .toggle_todo_status(request)
            .await
            .map_err(AppError::from)?;
        maybe_todo(response.into_inner())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let request = tonic::Request::new(IdRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.delete_todo(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().deleted)
    }

    pub async fn stats(&self) -> AppResult<TodoStats> {
        let mut client = self.client.clone();
        let response = client
            .todo_stats(tonic::Request::new(StatsRequest {}))
            .await
            .map_err(AppError::from)?;
        let proto = response.into_inner();

        Ok(TodoStats {
            total: proto.total as usize,
            pending: proto.pending as usize,
            in_progress: proto.in_progress as usize,
            done: proto.done as usize,
            overdue: proto.overdue as usize,
        })
    }
}
