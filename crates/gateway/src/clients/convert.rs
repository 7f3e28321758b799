//! Wire messages to domain values.
//!
//! A malformed message from a service is an internal error: the services
//! only emit catalog identifiers and RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use std::str::FromStr;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use uuid::Uuid;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{Action, Agent, DomainError, Module, Permission, Todo, User, UserStatus};
use proto::backoffice::{self, AgentMessage, TodoMessage};
use proto::session::UserMessage;

/// Lazily connected channel; an unreachable service surfaces per call.
pub(crate) fn channel(config: &GrpcClientConfig) -> Result<Channel, tonic::transport::Error> {
    let endpoint = Endpoint::from_shared(config.endpoint.clone())?
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .timeout(Duration::from_millis(config.request_timeout_ms));
    Ok(endpoint.connect_lazy())
}

fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    raw.parse()
        .map_err(|_| AppError::internal(format!("Invalid UUID: {}", raw)))
}

fn parse_time(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::internal(format!("Invalid date: {}", raw)))
}

fn parse_id<T: FromStr<Err = DomainError>>(raw: &str) -> AppResult<T> {
    raw.parse()
        .map_err(|e: DomainError| AppError::internal(e.to_string()))
}

fn grant(module: &str, actions: &[String]) -> AppResult<Permission> {
    let module: Module = parse_id(module)?;
    let actions = actions
        .iter()
        .map(|a| parse_id::<Action>(a))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Permission::new(module, actions))
}

pub(crate) fn user_from_proto(msg: UserMessage) -> AppResult<User> {
    let permissions = if msg.has_permissions {
        Some(
            msg.permissions
                .iter()
                .map(|g| grant(&g.module, &g.actions))
                .collect::<AppResult<Vec<_>>>()?,
        )
    } else {
        None
    };

    Ok(User {
        id: parse_uuid(&msg.id)?,
        email: msg.email,
        password_hash: String::new(),
        last_name: msg.last_name,
        first_name: msg.first_name,
        role: parse_id(&msg.role)?,
        agency_id: msg.agency_id.as_deref().map(parse_uuid).transpose()?,
        permissions,
        status: msg.status.as_deref().map(parse_id::<UserStatus>).transpose()?,
        created_at: parse_time(&msg.created_at)?,
    })
}

/// Unset message fields mean the service answered without a user.
pub(crate) fn required_user(msg: Option<UserMessage>) -> AppResult<User> {
    msg.map(user_from_proto)
        .unwrap_or_else(|| Err(AppError::internal("Missing user in response")))
}

pub(crate) fn agent_from_proto(msg: AgentMessage) -> AppResult<Agent> {
    Ok(Agent {
        id: parse_uuid(&msg.id)?,
        last_name: msg.last_name,
        first_name: msg.first_name,
        email: msg.email,
        phone: msg.phone,
        permissions: msg
            .permissions
            .iter()
            .map(|g| grant(&g.module, &g.actions))
            .collect::<AppResult<Vec<_>>>()?,
        status: parse_id(&msg.status)?,
        created_at: parse_time(&msg.created_at)?,
    })
}

pub(crate) fn todo_from_proto(msg: TodoMessage) -> AppResult<Todo> {
    Ok(Todo {
        id: parse_uuid(&msg.id)?,
        title: msg.title,
        description: msg.description,
        client_id: msg.client_id,
        client_name: msg.client_name,
        due_at: parse_time(&msg.due_at)?,
        priority: parse_id(&msg.priority)?,
        status: parse_id(&msg.status)?,
        kind: parse_id(&msg.kind)?,
        created_at: parse_time(&msg.created_at)?,
        assignee: msg.assignee,
    })
}

pub(crate) fn grant_to_proto(grant: &Permission) -> backoffice::Grant {
    backoffice::Grant {
        module: grant.module.as_str().to_string(),
        actions: grant.actions.iter().map(|a| a.as_str().to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{AgentStatus, Priority, Role, TodoKind, TodoStatus};
    use proto::session;

    fn user_message() -> UserMessage {
        UserMessage {
            id: Uuid::new_v4().to_string(),
            email: "sophie.martin@agence-soleil.fr".to_string(),
            last_name: "Martin".to_string(),
            first_name: "Sophie".to_string(),
            role: "agent".to_string(),
            agency_id: Some(Uuid::new_v4().to_string()),
            has_permissions: true,
            permissions: vec![session::Grant {
                module: "clients".to_string(),
                actions: vec!["lire".to_string()],
            }],
            status: Some("actif".to_string()),
            created_at: "2024-01-15T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_user_grants_are_read_from_the_wire() {
        let user = user_from_proto(user_message()).unwrap();

        assert_eq!(user.role, Role::Agent);
        assert_eq!(user.status, Some(UserStatus::Active));
        assert_eq!(
            user.permissions,
            Some(vec![Permission::new(Module::Clients, [Action::Read])])
        );
        assert!(user.password_hash.is_empty());
    }

    #[test]
    fn test_missing_grant_list_stays_absent() {
        let msg = UserMessage {
            has_permissions: false,
            permissions: Vec::new(),
            ..user_message()
        };
        assert_eq!(user_from_proto(msg).unwrap().permissions, None);

        let msg = UserMessage {
            permissions: Vec::new(),
            ..user_message()
        };
        assert_eq!(user_from_proto(msg).unwrap().permissions, Some(Vec::new()));
    }

    #[test]
    fn test_unknown_role_is_internal_error() {
        let msg = UserMessage {
            role: "admin".to_string(),
            ..user_message()
        };
        assert!(matches!(user_from_proto(msg), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_missing_user_is_internal_error() {
        assert!(matches!(required_user(None), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_agent_and_todo_messages() {
        let agent = agent_from_proto(AgentMessage {
            id: Uuid::new_v4().to_string(),
            last_name: "Dubois".to_string(),
            first_name: "Jean".to_string(),
            email: "jean.dubois@agence.com".to_string(),
            phone: String::new(),
            permissions: vec![grant_to_proto(&Permission::new(
                Module::Invoices,
                [Action::Read, Action::Create],
            ))],
            status: "suspendu".to_string(),
            created_at: "2024-02-20T14:30:00Z".to_string(),
        })
        .unwrap();
        assert_eq!(agent.status, AgentStatus::Suspended);
        assert_eq!(agent.permissions[0].module, Module::Invoices);

        let todo = todo_from_proto(TodoMessage {
            id: Uuid::new_v4().to_string(),
            title: "Relancer le client".to_string(),
            description: String::new(),
            client_id: None,
            client_name: None,
            due_at: "2024-03-01T09:00:00+01:00".to_string(),
            priority: "urgente".to_string(),
            status: "en_cours".to_string(),
            kind: "suivi".to_string(),
            created_at: "2024-02-25T09:00:00Z".to_string(),
            assignee: None,
        })
        .unwrap();
        assert_eq!(todo.priority, Priority::Urgent);
        assert_eq!(todo.status, TodoStatus::InProgress);
        assert_eq!(todo.kind, TodoKind::FollowUp);
        assert_eq!(todo.due_at.to_rfc3339(), "2024-03-01T08:00:00+00:00");
    }
}
