//! Demo collections loaded when seeding is enabled, newest first.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use domain::{
    Action, Agent, AgentStatus, Module, Permission, Priority, Todo, TodoKind, TodoStatus,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

pub fn demo_agents() -> Vec<Agent> {
    use Action::{Create, Read, Update};

    let agent = |last_name: &str,
                 first_name: &str,
                 email: &str,
                 phone: &str,
                 permissions: Vec<Permission>,
                 status: AgentStatus,
                 created_at: DateTime<Utc>| Agent {
        id: Uuid::new_v4(),
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        permissions,
        status,
        created_at,
    };

    vec![
        agent(
            "Martin",
            "Sophie",
            "sophie.martin@agence.com",
            "+33 1 23 45 67 89",
            vec![
                Permission::new(Module::Clients, [Read, Create, Update]),
                Permission::new(Module::Invoices, [Read, Create]),
                Permission::new(Module::Packages, [Read]),
            ],
            AgentStatus::Active,
            at(2024, 1, 10, 0, 0),
        ),
        agent(
            "Dubois",
            "Jean",
            "jean.dubois@agence.com",
            "+33 1 98 76 54 32",
            vec![
                Permission::new(Module::Clients, [Read]),
                Permission::new(Module::Invoices, [Read]),
                Permission::new(Module::PurchaseOrders, [Read, Create]),
            ],
            AgentStatus::Active,
            at(2024, 1, 8, 0, 0),
        ),
        agent(
            "Leroy",
            "Marie",
            "marie.leroy@agence.com",
            "+33 4 56 78 90 12",
            vec![
                Permission::new(Module::Cash, [Read, Create, Update]),
                Permission::new(Module::Invoices, [Read, Create, Update]),
                Permission::new(Module::Clients, [Read, Create]),
            ],
            AgentStatus::Suspended,
            at(2024, 1, 5, 0, 0),
        ),
    ]
}

pub fn demo_todos() -> Vec<Todo> {
    vec![
        Todo {
            id: Uuid::new_v4(),
            title: "Rappeler Martin Dubois".to_string(),
            description: "Confirmer les dates de voyage pour le package Rome".to_string(),
            client_id: Some("1".to_string()),
            client_name: Some("Martin Dubois".to_string()),
            due_at: at(2024, 1, 20, 10, 0),
            priority: Priority::High,
            status: TodoStatus::Pending,
            kind: TodoKind::Reminder,
            created_at: at(2024, 1, 15, 9, 0),
            assignee: Some("Sophie Martin".to_string()),
        },
        Todo {
            id: Uuid::new_v4(),
            title: "Finaliser devis Entreprise ABC".to_string(),
            description: "Préparer le devis détaillé pour le séminaire de 3 jours".to_string(),
            client_id: Some("2".to_string()),
            client_name: Some("Entreprise ABC".to_string()),
            due_at: at(2024, 1, 18, 16, 0),
            priority: Priority::Urgent,
            status: TodoStatus::InProgress,
            kind: TodoKind::Task,
            created_at: at(2024, 1, 14, 14, 0),
            assignee: None,
        },
        Todo {
            id: Uuid::new_v4(),
            title: "Suivi satisfaction client".to_string(),
            description: "Appeler Sophie Martin pour recueillir ses impressions sur le voyage"
                .to_string(),
            client_id: Some("3".to_string()),
            client_name: Some("Sophie Martin".to_string()),
            due_at: at(2024, 1, 25, 14, 30),
            priority: Priority::Normal,
            status: TodoStatus::Done,
            kind: TodoKind::FollowUp,
            created_at: at(2024, 1, 12, 11, 0),
            assignee: None,
        },
    ]
}
