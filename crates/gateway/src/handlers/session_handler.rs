//! What the signed-in account may see and do.

use axum::{
    extract::{Extension, Path},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use domain::{accessible_modules, check_permission, visible_entries, Module, NavItem, UserResponse};

use crate::middleware::CurrentUser;
use crate::state::AppState;

/// A module the account can open.
#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct ModuleEntry {
    #[schema(example = "factures")]
    pub id: String,
    #[schema(example = "Factures")]
    pub label: String,
    #[schema(example = "/factures")]
    pub path: String,
}

impl From<Module> for ModuleEntry {
    fn from(module: Module) -> Self {
        Self {
            id: module.as_str().to_string(),
            label: module.label().to_string(),
            path: module.path(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionCheck {
    pub module: String,
    pub action: String,
    pub allowed: bool,
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user))
        .route("/modules", get(get_modules))
        .route("/navigation", get(get_navigation))
        .route("/permissions/:module/:action", get(get_permission))
}

/// Profile of the signed-in account
#[utoipa::path(
    get,
    path = "/session/me",
    tag = "Session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Agency pending approval")
    )
)]
pub async fn get_current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// Modules the account can open
#[utoipa::path(
    get,
    path = "/session/modules",
    tag = "Session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Accessible modules", body = Vec<ModuleEntry>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_modules(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<Vec<ModuleEntry>> {
    Json(
        accessible_modules(Some(&user))
            .into_iter()
            .map(ModuleEntry::from)
            .collect(),
    )
}

/// Side menu for the account, in menu order
#[utoipa::path(
    get,
    path = "/session/navigation",
    tag = "Session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Visible menu entries", body = Vec<NavItem>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_navigation(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<Vec<NavItem>> {
    Json(visible_entries(&user))
}

/// Check one (module, action) pair; unknown ids are simply not allowed
#[utoipa::path(
    get,
    path = "/session/permissions/{module}/{action}",
    tag = "Session",
    security(("bearer_auth" = [])),
    params(
        ("module" = String, Path, description = "Module id, e.g. `clients`"),
        ("action" = String, Path, description = "Action id: lire, creer, modifier, supprimer")
    ),
    responses(
        (status = 200, description = "Permission verdict", body = PermissionCheck),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_permission(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((module, action)): Path<(String, String)>,
) -> Json<PermissionCheck> {
    let allowed = check_permission(Some(&user), &module, &action);
    Json(PermissionCheck {
        module,
        action,
        allowed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Action, Permission, Role, User};
    use uuid::Uuid;

    fn agent(grants: Vec<Permission>) -> CurrentUser {
        CurrentUser(
            User::new(
                Uuid::new_v4(),
                "sophie.martin@agence-soleil.fr".to_string(),
                String::new(),
                "Martin".to_string(),
                "Sophie".to_string(),
                Role::Agent,
            )
            .with_permissions(grants),
        )
    }

    #[tokio::test]
    async fn test_modules_follow_agent_grants() {
        let user = agent(vec![
            Permission::new(Module::Invoices, [Action::Read]),
            Permission::new(Module::Clients, [Action::Read, Action::Create]),
        ]);

        let Json(modules) = get_modules(Extension(user)).await;
        let ids: Vec<_> = modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["factures", "clients"]);
        assert_eq!(modules[0].path, "/factures");
    }

    #[tokio::test]
    async fn test_permission_check_by_raw_ids() {
        let grants = vec![Permission::new(Module::Clients, [Action::Read])];

        let check = |module: &str, action: &str| {
            get_permission(
                Extension(agent(grants.clone())),
                Path((module.to_string(), action.to_string())),
            )
        };

        assert!(check("clients", "lire").await.0.allowed);
        assert!(!check("clients", "creer").await.0.allowed);
        assert!(!check("hotels", "lire").await.0.allowed);
    }

    #[tokio::test]
    async fn test_navigation_hides_platform_entries_from_agents() {
        let Json(items) = get_navigation(Extension(agent(Vec::new()))).await;
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();

        assert!(ids.contains(&"dashboard"));
        assert!(!ids.contains(&"agences"));
        assert!(!ids.contains(&"profile"));
    }
}
