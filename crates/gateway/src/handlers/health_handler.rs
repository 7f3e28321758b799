//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use common::AppResult;

use crate::clients::TokenVerifier;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub services: ServiceStatus,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub redis: ServiceHealth,
    pub session: ServiceHealth,
    pub backoffice: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    fn from_result<T>(result: AppResult<T>) -> Self {
        match result {
            Ok(_) => Self {
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy".to_string(),
                error: Some(e.user_message()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Checks Redis and both gRPC services concurrently.
pub async fn health_check(State(state): State<AppState>) -> Response {
    // An empty token is rejected without touching the directory
    let (redis, session, backoffice) = futures::join!(
        state.cache.ping(),
        state.session_client.verify_token(""),
        state.agent_client.stats(),
    );

    let services = ServiceStatus {
        redis: ServiceHealth::from_result(redis),
        session: ServiceHealth::from_result(session),
        backoffice: ServiceHealth::from_result(backoffice),
    };
    let all_healthy =
        services.redis.is_healthy() && services.session.is_healthy() && services.backoffice.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        services,
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
