//! Agency approval, reserved to the platform superadmin.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;
use uuid::Uuid;

use common::AppResult;
use domain::{UserResponse, UserStatus};

use crate::middleware::{require_superadmin, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgencyQuery {
    /// `actif`, `suspendu` or `en_attente`
    #[param(value_type = Option<String>)]
    pub status: Option<UserStatus>,
}

pub fn agency_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_agencies))
        .route("/:id/approve", post(approve_agency))
        .route("/:id/suspend", post(suspend_agency))
}

/// List agency accounts
#[utoipa::path(
    get,
    path = "/agences",
    tag = "Agencies",
    security(("bearer_auth" = [])),
    params(AgencyQuery),
    responses(
        (status = 200, description = "Agency accounts", body = Vec<UserResponse>),
        (status = 403, description = "Forbidden - Superadmin only")
    )
)]
pub async fn list_agencies(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<AgencyQuery>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_superadmin(&current_user)?;
    let agencies = state.session_client.list_agencies(query.status).await?;
    Ok(Json(agencies.into_iter().map(UserResponse::from).collect()))
}

/// Activate an agency; a pending agency gains access at its next request
#[utoipa::path(
    post,
    path = "/agences/{id}/approve",
    tag = "Agencies",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Agency account ID")),
    responses(
        (status = 200, description = "Agency active", body = UserResponse),
        (status = 400, description = "Account is not an agency"),
        (status = 403, description = "Forbidden - Superadmin only"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn approve_agency(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    require_superadmin(&current_user)?;
    let agency = state
        .session_client
        .set_agency_status(id, UserStatus::Active)
        .await?;
    info!("Agency {} approved by {}", agency.email, current_user.0.email);
    Ok(Json(UserResponse::from(agency)))
}

/// Suspend an agency; its tokens stop verifying
#[utoipa::path(
    post,
    path = "/agences/{id}/suspend",
    tag = "Agencies",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Agency account ID")),
    responses(
        (status = 200, description = "Agency suspended", body = UserResponse),
        (status = 400, description = "Account is not an agency"),
        (status = 403, description = "Forbidden - Superadmin only"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn suspend_agency(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    require_superadmin(&current_user)?;
    let agency = state
        .session_client
        .set_agency_status(id, UserStatus::Suspended)
        .await?;
    info!("Agency {} suspended by {}", agency.email, current_user.0.email);
    Ok(Json(UserResponse::from(agency)))
}
