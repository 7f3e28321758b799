//! Authentication handlers: public entry points of the back-office.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::AppResult;
use domain::{
    navigate, AuthSession, GuardState, Navigation, UserResponse, PATH_DASHBOARD,
};

use crate::extractors::ValidatedJson;
use crate::middleware::{bearer_token, resolve_session};
use crate::state::AppState;

/// Agency registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "contact@evasion-voyages.fr")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "motdepasse123", min_length = 8)]
    pub password: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Evasion")]
    pub last_name: String,
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Voyages")]
    pub first_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "contact@agence-soleil.fr")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Issued token, the account, and where the client should land.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
    #[schema(example = "/dashboard")]
    pub redirect: String,
}

/// Guard verdict for the caller's session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub state: GuardState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct NavigateQuery {
    /// Requested page, e.g. `/caisse`
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NavigationOutcome {
    Render,
    Redirect,
    Wait,
    PendingApproval,
    NotFound,
}

/// What the navigation surface should do with a requested page.
#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavigateResponse {
    pub outcome: NavigationOutcome,
    /// Page to render or to redirect to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<Navigation> for NavigateResponse {
    fn from(navigation: Navigation) -> Self {
        let (outcome, path) = match navigation {
            Navigation::Render(route) => (NavigationOutcome::Render, Some(route.path())),
            Navigation::Redirect(path) => (NavigationOutcome::Redirect, Some(path)),
            Navigation::Wait => (NavigationOutcome::Wait, None),
            Navigation::ShowPendingApproval => (NavigationOutcome::PendingApproval, None),
            Navigation::NotFound => (NavigationOutcome::NotFound, None),
        };
        Self { outcome, path }
    }
}

fn session_response(session: &AuthSession) -> SessionResponse {
    let state = GuardState::evaluate(session);
    SessionResponse {
        state,
        redirect: state.redirect().map(str::to_string),
        user: session.user.as_ref().map(UserResponse::from),
    }
}

/// Landing page right after login.
fn landing_page(session: &AuthSession) -> String {
    GuardState::evaluate(session)
        .redirect()
        .unwrap_or(PATH_DASHBOARD)
        .to_string()
}

/// Credential endpoints, kept apart for the stricter rate limit.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Session polling and route checks; clients call these on every page.
pub fn auth_session_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session))
        .route("/navigate", get(navigate_to))
}

/// Register a new agency account (pending approval)
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Agency registered, awaiting approval", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .session_client
        .register(
            payload.email,
            payload.password,
            payload.last_name,
            payload.first_name,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account suspended"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let result = state
        .session_client
        .login(payload.email, payload.password)
        .await?;
    let user = UserResponse::from(&result.user);
    let session = AuthSession::authenticated(result.user);

    Ok(Json(LoginResponse {
        access_token: result.token.access_token,
        token_type: result.token.token_type,
        expires_in: result.token.expires_in,
        user,
        redirect: landing_page(&session),
    }))
}

/// Guard state of the caller; answers even without a token
#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "Authentication",
    security((), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Guard state and redirect", body = SessionResponse)
    )
)]
pub async fn session(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> AppResult<Json<SessionResponse>> {
    let session = resolve_session(state.session_client.as_ref(), bearer_token(&bearer)).await?;
    Ok(Json(session_response(&session)))
}

/// Resolve a page against the route table and the guard
#[utoipa::path(
    get,
    path = "/auth/navigate",
    tag = "Authentication",
    security((), ("bearer_auth" = [])),
    params(NavigateQuery),
    responses(
        (status = 200, description = "Navigation decision", body = NavigateResponse)
    )
)]
pub async fn navigate_to(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<NavigateQuery>,
) -> AppResult<Json<NavigateResponse>> {
    let session = resolve_session(state.session_client.as_ref(), bearer_token(&bearer)).await?;
    Ok(Json(NavigateResponse::from(navigate(&query.path, &session))))
}
