//! Middleware for session resolution, permission checks and rate limiting.

mod cache;
mod rate_limit;
mod session;

pub use cache::Cache;
pub use rate_limit::{rate_limit_auth_middleware, rate_limit_middleware};
pub use session::{
    admit, bearer_token, require_permission, require_superadmin, resolve_session,
    session_middleware, CurrentUser,
};
