//! gRPC implementation for TodoService.

use std::sync::Arc;

use chrono::Utc;
use tonic::{Request, Response, Status};

use super::convert::{parse_id, parse_opt, parse_time, todo_to_proto};
use crate::service::TodoService;
use domain::{NewTodo, TodoFilter, TodoPatch};
use proto::backoffice::{
    todo_service_server::TodoService as TodoServiceProto, CreateTodoRequest, DeleteResponse,
    IdRequest, ListTodosRequest, ListTodosResponse, MaybeTodo, StatsRequest, TodoMessage,
    TodoStatsResponse, UpdateTodoRequest,
};

/// gRPC service wrapper for TodoService.
pub struct TodoGrpcService {
    service: Arc<dyn TodoService>,
}

impl TodoGrpcService {
    pub fn new(service: Arc<dyn TodoService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl TodoServiceProto for TodoGrpcService {
    async fn list_todos(
        &self,
        request: Request<ListTodosRequest>,
    ) -> Result<Response<ListTodosResponse>, Status> {
        let req = request.into_inner();
        let filter = TodoFilter {
            search: req.search,
            status: parse_opt(req.status)?,
            priority: parse_opt(req.priority)?,
        };

        let todos = self
            .service
            .list_todos(filter)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(ListTodosResponse {
            todos: todos.iter().map(todo_to_proto).collect(),
        }))
    }

    async fn create_todo(
        &self,
        request: Request<CreateTodoRequest>,
    ) -> Result<Response<TodoMessage>, Status> {
        let req = request.into_inner();
        let input = NewTodo {
            title: req.title,
            description: req.description,
            client_id: req.client_id,
            client_name: req.client_name,
            due_at: req.due_at.as_deref().map(parse_time).transpose()?,
            priority: parse_opt(req.priority)?.unwrap_or_default(),
            kind: parse_opt(req.kind)?.unwrap_or_default(),
            assignee: req.assignee,
        };

        let todo = self
            .service
            .create_todo(input)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(todo_to_proto(&todo)))
    }

    async fn update_todo(
        &self,
        request: Request<UpdateTodoRequest>,
    ) -> Result<Response<MaybeTodo>, Status> {
        let req = request.into_inner();
        let id = parse_id(&req.id)?;
        let patch = TodoPatch {
            title: req.title,
            description: req.description,
            client_id: req.client_id,
            client_name: req.client_name,
            due_at: req.due_at.as_deref().map(parse_time).transpose()?,
            priority: parse_opt(req.priority)?,
            status: parse_opt(req.status)?,
            kind: parse_opt(req.kind)?,
            assignee: req.assignee,
        };

        let todo = self
            .service
            .update_todo(id, patch)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(MaybeTodo {
            todo: todo.as_ref().map(todo_to_proto),
        }))
    }

    async fn toggle_todo_status(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<MaybeTodo>, Status> {
        let id = parse_id(&request.into_inner().id)?;

        let todo = self
            .service
            .toggle_status(id)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(MaybeTodo {
            todo: todo.as_ref().map(todo_to_proto),
        }))
    }

    async fn delete_todo(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = parse_id(&request.into_inner().id)?;

        let deleted = self
            .service
            .delete_todo(id)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(DeleteResponse { deleted }))
    }

    async fn todo_stats(
        &self,
        _request: Request<StatsRequest>,
    ) -> Result<Response<TodoStatsResponse>, Status> {
        let stats = self.service.stats(Utc::now()).await.map_err(Status::from)?;

        Ok(Response::new(TodoStatsResponse {
            total: stats.total as u64,
            pending: stats.pending as u64,
            in_progress: stats.in_progress as u64,
            done: stats.done as u64,
            overdue: stats.overdue as u64,
        }))
    }
}
