//! Conversions between domain types and their wire form.

use chrono::{DateTime, Utc};
use std::str::FromStr;
use tonic::Status;
use uuid::Uuid;

use common::AppError;
use domain::{Action, Agent, DomainError, Module, Permission, Todo};
use proto::backoffice::{AgentMessage, Grant, TodoMessage};

fn invalid(err: DomainError) -> Status {
    Status::from(AppError::from(err))
}

pub(super) fn parse_id(raw: &str) -> Result<Uuid, Status> {
    raw.parse()
        .map_err(|_| Status::invalid_argument(format!("Invalid id: {}", raw)))
}

pub(super) fn parse_time(raw: &str) -> Result<DateTime<Utc>, Status> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Status::invalid_argument(format!("Invalid date: {}", raw)))
}

/// Parse an optional catalog identifier; blank counts as absent.
pub(super) fn parse_opt<T>(raw: Option<String>) -> Result<Option<T>, Status>
where
    T: FromStr<Err = DomainError>,
{
    raw.filter(|value| !value.is_empty())
        .map(|value| value.parse::<T>().map_err(invalid))
        .transpose()
}

pub(super) fn grant_from_proto(grant: Grant) -> Result<Permission, Status> {
    let module: Module = grant.module.parse().map_err(invalid)?;
    let actions = grant
        .actions
        .iter()
        .map(|action| action.parse::<Action>().map_err(invalid))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Permission::new(module, actions))
}

pub(super) fn grants_from_proto(grants: Vec<Grant>) -> Result<Vec<Permission>, Status> {
    grants.into_iter().map(grant_from_proto).collect()
}

fn grant_to_proto(grant: &Permission) -> Grant {
    Grant {
        module: grant.module.as_str().to_string(),
        actions: grant.actions.iter().map(|a| a.as_str().to_string()).collect(),
    }
}

pub(super) fn agent_to_proto(agent: &Agent) -> AgentMessage {
    AgentMessage {
        id: agent.id.to_string(),
        last_name: agent.last_name.clone(),
        first_name: agent.first_name.clone(),
        email: agent.email.clone(),
        phone: agent.phone.clone(),
        permissions: agent.permissions.iter().map(grant_to_proto).collect(),
        status: agent.status.as_str().to_string(),
        created_at: agent.created_at.to_rfc3339(),
    }
}

pub(super) fn todo_to_proto(todo: &Todo) -> TodoMessage {
    TodoMessage {
        id: todo.id.to_string(),
        title: todo.title.clone(),
        description: todo.description.clone(),
        client_id: todo.client_id.clone(),
        client_name: todo.client_name.clone(),
        due_at: todo.due_at.to_rfc3339(),
        priority: todo.priority.as_str().to_string(),
        status: todo.status.as_str().to_string(),
        kind: todo.kind.as_str().to_string(),
        created_at: todo.created_at.to_rfc3339(),
        assignee: todo.assignee.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::TodoStatus;

    #[test]
    fn test_unknown_module_is_invalid_argument() {
        let status = grant_from_proto(Grant {
            module: "hotels".to_string(),
            actions: vec!["lire".to_string()],
        })
        .unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_blank_optional_identifier_is_absent() {
        let parsed: Option<TodoStatus> = parse_opt(Some(String::new())).unwrap();
        assert_eq!(parsed, None);

        let parsed: Option<TodoStatus> = parse_opt(Some("en_cours".to_string())).unwrap();
        assert_eq!(parsed, Some(TodoStatus::InProgress));
    }

    #[test]
    fn test_grant_actions_parse() {
        let grant = grant_from_proto(Grant {
            module: "bons-commande".to_string(),
            actions: vec!["lire".to_string(), "creer".to_string()],
        })
        .unwrap();

        assert_eq!(grant, Permission::new(Module::PurchaseOrders, [Action::Read, Action::Create]));
    }
}
