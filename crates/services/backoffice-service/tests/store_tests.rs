//! Collection behavior over the seeded stores.

use std::sync::Arc;

use backoffice_service_lib::config::BackofficeServiceConfig;
use backoffice_service_lib::repository::{demo_agents, demo_todos, MemoryStore};
use backoffice_service_lib::service::{AgentManager, AgentService, TodoManager, TodoService};
use domain::{
    has_permission, Action, AgentFilter, AgentStatus, Module, NewAgent, Priority, Role,
    TodoFilter, TodoStatus, User,
};
use proptest::prelude::*;
use tokio_test::assert_err;
use uuid::Uuid;

fn todo_service() -> TodoManager {
    TodoManager::new(Arc::new(MemoryStore::with_items(demo_todos())))
}

fn agent_service() -> AgentManager {
    AgentManager::new(Arc::new(MemoryStore::with_items(demo_agents())))
}

#[tokio::test]
async fn test_deleting_unknown_todo_keeps_three_seeded() {
    let service = todo_service();

    let deleted = service.delete_todo(Uuid::new_v4()).await.unwrap();

    assert!(!deleted);
    assert_eq!(service.list_todos(TodoFilter::default()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_todo_search_and_filters() {
    let service = todo_service();

    let by_client = service
        .list_todos(TodoFilter {
            search: Some("entreprise abc".to_string()),
            ..TodoFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_client.len(), 1);
    assert_eq!(by_client[0].priority, Priority::Urgent);

    let done = service
        .list_todos(TodoFilter {
            status: Some(TodoStatus::Done),
            ..TodoFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
}

#[tokio::test]
async fn test_todo_toggle_returns_to_start_after_three_steps() {
    let service = todo_service();
    let first = service.list_todos(TodoFilter::default()).await.unwrap()[0].clone();

    for _ in 0..3 {
        service.toggle_status(first.id).await.unwrap();
    }

    let todos = service.list_todos(TodoFilter::default()).await.unwrap();
    assert_eq!(todos[0].status, first.status);
}

#[tokio::test]
async fn test_agent_with_blank_last_name_is_not_added() {
    let service = agent_service();

    let result = service
        .create_agent(NewAgent {
            last_name: String::new(),
            first_name: "Paul".to_string(),
            email: "paul@agence.com".to_string(),
            ..NewAgent::default()
        })
        .await;

    assert_err!(result);
    assert_eq!(service.stats().await.unwrap().total, 3);
}

#[tokio::test]
async fn test_agent_stats_and_status_filter() {
    let service = agent_service();

    let stats = service.stats().await.unwrap();
    assert_eq!((stats.total, stats.active, stats.suspended), (3, 2, 1));

    let suspended = service
        .list_agents(AgentFilter {
            search: None,
            status: Some(AgentStatus::Suspended),
        })
        .await
        .unwrap();
    assert_eq!(suspended[0].last_name, "Leroy");
}

// Agent records are not sign-in accounts; the user here is built from the
// stored record to check the normalized grant list the evaluator reads.
#[tokio::test]
async fn test_stored_grant_list_evaluates_as_edited() {
    let service = agent_service();
    let dubois = service
        .list_agents(AgentFilter {
            search: Some("dubois".to_string()),
            status: None,
        })
        .await
        .unwrap()
        .remove(0);

    let mut grants = dubois.permissions.clone();
    domain::set_action(&mut grants, Module::Todos, Action::Create, true);
    let updated = service
        .update_permissions(dubois.id, grants)
        .await
        .unwrap()
        .unwrap();

    let as_user = User::new(
        updated.id,
        updated.email.clone(),
        String::new(),
        updated.last_name.clone(),
        updated.first_name.clone(),
        Role::Agent,
    )
    .with_permissions(updated.permissions);

    assert!(has_permission(Some(&as_user), Module::Todos, Action::Create));
    assert!(!has_permission(Some(&as_user), Module::Todos, Action::Delete));
}

#[test]
fn test_seeding_is_opt_in() {
    let (agents, todos) = backoffice_service_lib::build_stores(&BackofficeServiceConfig::default());
    let runtime = tokio::runtime::Runtime::new().unwrap();

    runtime.block_on(async {
        assert!(agents.is_empty().await);
        assert!(todos.is_empty().await);
    });
}

proptest! {
    #[test]
    fn agent_toggle_is_an_involution(flips in 0usize..6) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let service = agent_service();
            let before = service.stats().await.unwrap();
            let martin = service.list_agents(AgentFilter::default()).await.unwrap()[0].clone();

            for _ in 0..flips * 2 {
                service.toggle_status(martin.id).await.unwrap();
            }

            prop_assert_eq!(service.stats().await.unwrap(), before);
            Ok(())
        })?;
    }
}
