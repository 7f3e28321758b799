//! Demo accounts, one per role plus an agency awaiting approval.

use uuid::Uuid;

use domain::{Action, Module, Permission, Role, User, UserStatus};

/// Build the demo accounts, all sharing `password_hash`.
pub fn demo_users(password_hash: &str) -> Vec<User> {
    let user = |email: &str, last_name: &str, first_name: &str, role: Role| {
        User::new(
            Uuid::new_v4(),
            email.to_string(),
            password_hash.to_string(),
            last_name.to_string(),
            first_name.to_string(),
            role,
        )
    };

    let admin = user("admin@plateforme-voyages.fr", "Admin", "Plateforme", Role::Superadmin)
        .with_status(UserStatus::Active);
    let agency = user("contact@agence-soleil.fr", "Soleil", "Agence", Role::Agency)
        .with_status(UserStatus::Active);
    let pending = user("contact@evasion-voyages.fr", "Evasion", "Voyages", Role::Agency)
        .with_status(UserStatus::Pending);
    let agent = user("sophie.martin@agence-soleil.fr", "Martin", "Sophie", Role::Agent)
        .with_status(UserStatus::Active)
        .with_agency(agency.id)
        .with_permissions(vec![
            Permission::new(Module::Clients, [Action::Read, Action::Create, Action::Update]),
            Permission::new(Module::Invoices, [Action::Read]),
            Permission::new(Module::Todos, Action::ALL),
        ]);

    vec![admin, agency, pending, agent]
}
