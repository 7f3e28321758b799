//! Agent management handlers.
//!
//! Agents belong to the agency; only accounts with access to the `agents`
//! module get through, which in practice means agencies and the superadmin.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{
    Action, Agent, AgentFilter, AgentPatch, AgentStats, AgentStatus, Module, NewAgent, Permission,
};

use super::json_or_no_content;
use crate::extractors::ValidatedJson;
use crate::middleware::{require_permission, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgentQuery {
    /// Case-insensitive match on last name, first name or email
    pub search: Option<String>,
    /// `actif` or `suspendu`
    #[param(value_type = Option<String>)]
    pub status: Option<AgentStatus>,
}

impl From<AgentQuery> for AgentFilter {
    fn from(query: AgentQuery) -> Self {
        Self {
            search: query.search,
            status: query.status,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAgentRequest {
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Martin")]
    pub last_name: String,
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Sophie")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "sophie.martin@agence.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "+33 1 23 45 67 89")]
    pub phone: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl From<CreateAgentRequest> for NewAgent {
    fn from(request: CreateAgentRequest) -> Self {
        Self {
            last_name: request.last_name,
            first_name: request.first_name,
            email: request.email,
            phone: request.phone,
            permissions: request.permissions,
        }
    }
}

/// Contact fields to change; omitted fields are kept.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAgentRequest {
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<UpdateAgentRequest> for AgentPatch {
    fn from(request: UpdateAgentRequest) -> Self {
        Self {
            last_name: request.last_name,
            first_name: request.first_name,
            email: request.email,
            phone: request.phone,
            permissions: None,
        }
    }
}

/// Replacement grant list.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePermissionsRequest {
    pub permissions: Vec<Permission>,
}

pub fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_agents).post(create_agent))
        .route("/stats", get(agent_stats))
        .route("/:id", put(update_agent).delete(delete_agent))
        .route("/:id/permissions", put(update_permissions))
        .route("/:id/toggle-status", post(toggle_agent_status))
}

/// List agents, most recent first
#[utoipa::path(
    get,
    path = "/agents",
    tag = "Agents",
    security(("bearer_auth" = [])),
    params(AgentQuery),
    responses(
        (status = 200, description = "Matching agents", body = Vec<Agent>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_agents(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<AgentQuery>,
) -> AppResult<Json<Vec<Agent>>> {
    require_permission(&current_user, Module::Agents, Action::Read)?;
    let agents = state.agent_client.list(query.into()).await?;
    Ok(Json(agents))
}

/// Create an active agent
#[utoipa::path(
    post,
    path = "/agents",
    tag = "Agents",
    security(("bearer_auth" = [])),
    request_body = CreateAgentRequest,
    responses(
        (status = 201, description = "Agent created", body = Agent),
        (status = 400, description = "Missing required field or non-delegable module"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_agent(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAgentRequest>,
) -> AppResult<(StatusCode, Json<Agent>)> {
    require_permission(&current_user, Module::Agents, Action::Create)?;
    let agent = state.agent_client.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

/// Update an agent's contact fields
#[utoipa::path(
    put,
    path = "/agents/{id}",
    tag = "Agents",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Agent ID")),
    request_body = UpdateAgentRequest,
    responses(
        (status = 200, description = "Agent updated", body = Agent),
        (status = 204, description = "No agent with this id; nothing changed"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn update_agent(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAgentRequest>,
) -> AppResult<Response> {
    require_permission(&current_user, Module::Agents, Action::Update)?;
    let agent = state.agent_client.update(id, payload.into()).await?;
    Ok(json_or_no_content(agent))
}

/// Replace an agent's grants
#[utoipa::path(
    put,
    path = "/agents/{id}/permissions",
    tag = "Agents",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Agent ID")),
    request_body = UpdatePermissionsRequest,
    responses(
        (status = 200, description = "Grants replaced", body = Agent),
        (status = 204, description = "No agent with this id; nothing changed"),
        (status = 400, description = "Grant on a non-delegable module"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn update_permissions(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePermissionsRequest>,
) -> AppResult<Response> {
    require_permission(&current_user, Module::Agents, Action::Update)?;
    let agent = state
        .agent_client
        .update_permissions(id, payload.permissions)
        .await?;
    Ok(json_or_no_content(agent))
}

/// Suspend an active agent or reactivate a suspended one
#[utoipa::path(
    post,
    path = "/agents/{id}/toggle-status",
    tag = "Agents",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Agent ID")),
    responses(
        (status = 200, description = "Status flipped", body = Agent),
        (status = 204, description = "No agent with this id; nothing changed"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn toggle_agent_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    require_permission(&current_user, Module::Agents, Action::Update)?;
    let agent = state.agent_client.toggle_status(id).await?;
    Ok(json_or_no_content(agent))
}

/// Delete an agent; unknown ids are ignored
#[utoipa::path(
    delete,
    path = "/agents/{id}",
    tag = "Agents",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Agent ID")),
    responses(
        (status = 204, description = "Agent deleted or already absent"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn delete_agent(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_permission(&current_user, Module::Agents, Action::Delete)?;
    if !state.agent_client.delete(id).await? {
        debug!("Delete of unknown agent {} ignored", id);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Agent head counts
#[utoipa::path(
    get,
    path = "/agents/stats",
    tag = "Agents",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Totals by status", body = AgentStats),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn agent_stats(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<AgentStats>> {
    require_permission(&current_user, Module::Agents, Action::Read)?;
    Ok(Json(state.agent_client.stats().await?))
}
