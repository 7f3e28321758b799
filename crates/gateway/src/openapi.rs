//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::agent_handler::{
    CreateAgentRequest, UpdateAgentRequest, UpdatePermissionsRequest,
};
use crate::handlers::auth_handler::{
    LoginRequest, LoginResponse, NavigateResponse, NavigationOutcome, RegisterRequest,
    SessionResponse,
};
use crate::handlers::session_handler::{ModuleEntry, PermissionCheck};
use crate::handlers::todo_handler::{CreateTodoRequest, UpdateTodoRequest};
use domain::{
    Action, Agent, AgentStats, AgentStatus, EntryStatus, GuardState, Module, NavItem, Permission,
    Priority, Role, Todo, TodoKind, TodoStats, TodoStatus, UserResponse, UserStatus,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::session,
        crate::handlers::auth_handler::navigate_to,
        crate::handlers::session_handler::get_current_user,
        crate::handlers::session_handler::get_modules,
        crate::handlers::session_handler::get_navigation,
        crate::handlers::session_handler::get_permission,
        crate::handlers::agent_handler::list_agents,
        crate::handlers::agent_handler::create_agent,
        crate::handlers::agent_handler::update_agent,
        crate::handlers::agent_handler::update_permissions,
        crate::handlers::agent_handler::toggle_agent_status,
        crate::handlers::agent_handler::delete_agent,
        crate::handlers::agent_handler::agent_stats,
        crate::handlers::todo_handler::list_todos,
        crate::handlers::todo_handler::create_todo,
        crate::handlers::todo_handler::update_todo,
        crate::handlers::todo_handler::toggle_todo_status,
        crate::handlers::todo_handler::delete_todo,
        crate::handlers::todo_handler::todo_stats,
        crate::handlers::agency_handler::list_agencies,
        crate::handlers::agency_handler::approve_agency,
        crate::handlers::agency_handler::suspend_agency,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            SessionResponse,
            NavigateResponse,
            NavigationOutcome,
            GuardState,
            UserResponse,
            Role,
            UserStatus,
            ModuleEntry,
            PermissionCheck,
            NavItem,
            EntryStatus,
            Module,
            Action,
            Permission,
            Agent,
            AgentStatus,
            AgentStats,
            CreateAgentRequest,
            UpdateAgentRequest,
            UpdatePermissionsRequest,
            Todo,
            TodoStatus,
            Priority,
            TodoKind,
            TodoStats,
            CreateTodoRequest,
            UpdateTodoRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, agency registration and guard state"),
        (name = "Session", description = "Modules, menu and permissions of the signed-in account"),
        (name = "Agents", description = "Agency staff and their grants"),
        (name = "Todos", description = "Tasks, reminders and follow-ups"),
        (name = "Agencies", description = "Agency approval (superadmin)"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
