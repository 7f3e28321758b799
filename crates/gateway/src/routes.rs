//! Route configuration.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    agency_routes, agent_routes, auth_routes, auth_session_routes, health_routes, session_routes,
    todo_routes,
};
use crate::middleware::{rate_limit_auth_middleware, rate_limit_middleware, session_middleware};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes behind the session guard and the general rate limit.
fn protected(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    routes
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
}

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no session, no rate limit)
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public entry points: credentials get the stricter limit
        .nest(
            "/auth",
            auth_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_auth_middleware,
                ))
                .merge(auth_session_routes().route_layer(
                    middleware::from_fn_with_state(state.clone(), rate_limit_middleware),
                )),
        )
        .nest("/session", protected(session_routes(), &state))
        .nest("/agents", protected(agent_routes(), &state))
        .nest("/todos", protected(todo_routes(), &state))
        .nest("/agences", protected(agency_routes(), &state))
        .with_state(state)
}
