//! HTTP handlers, one module per resource.

pub mod agency_handler;
pub mod agent_handler;
pub mod auth_handler;
pub mod health_handler;
pub mod session_handler;
pub mod todo_handler;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

pub use agency_handler::agency_routes;
pub use agent_handler::agent_routes;
pub use auth_handler::{auth_routes, auth_session_routes};
pub use health_handler::health_routes;
pub use session_handler::session_routes;
pub use todo_handler::todo_routes;

/// Updated record, or `204 No Content` when the id matched nothing.
pub(crate) fn json_or_no_content<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_is_no_content() {
        assert_eq!(
            json_or_no_content::<u32>(None).status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(json_or_no_content(Some(7u32)).status(), StatusCode::OK);
    }
}
