//! Tests for the in-memory directory and the demo accounts.

use session_service_lib::directory::{demo_users, MemoryDirectory, UserDirectory};

use domain::{has_permission, Action, Module, Role, User, UserStatus};
use tokio_test::assert_err;
use uuid::Uuid;

fn agency(email: &str) -> User {
    User::new(
        Uuid::new_v4(),
        email.to_string(),
        String::new(),
        "Soleil".to_string(),
        "Agence".to_string(),
        Role::Agency,
    )
    .with_status(UserStatus::Pending)
}

#[tokio::test]
async fn test_email_lookup_ignores_case() {
    let directory = MemoryDirectory::with_users(vec![agency("Contact@Soleil.fr")]);

    let found = directory.find_by_email("contact@soleil.fr").await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn test_insert_refuses_duplicate_email() {
    let directory = MemoryDirectory::new();
    directory.insert(agency("contact@soleil.fr")).await.unwrap();

    let duplicate = directory.insert(agency("CONTACT@soleil.fr")).await;
    assert_err!(duplicate);
    assert_eq!(directory.list_by_role(Role::Agency).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_set_status_on_unknown_id_is_none() {
    let directory = MemoryDirectory::new();
    let result = directory
        .set_status(Uuid::new_v4(), UserStatus::Active)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_set_status_persists() {
    let pending = agency("contact@soleil.fr");
    let directory = MemoryDirectory::with_users(vec![pending.clone()]);

    directory
        .set_status(pending.id, UserStatus::Active)
        .await
        .unwrap();

    let stored = directory.find_by_id(pending.id).await.unwrap().unwrap();
    assert_eq!(stored.status, Some(UserStatus::Active));
    assert!(!stored.is_pending_agency());
}

#[test]
fn test_demo_users_cover_every_role() {
    let users = demo_users("hash");

    for role in [Role::Superadmin, Role::Agency, Role::Agent] {
        assert!(users.iter().any(|u| u.role == role));
    }
    assert!(users.iter().any(User::is_pending_agency));

    let agent = users.iter().find(|u| u.role == Role::Agent).unwrap();
    assert!(agent.agency_id.is_some());
    assert!(has_permission(Some(agent), Module::Todos, Action::Delete));
    assert!(!has_permission(Some(agent), Module::Cash, Action::Read));
}
