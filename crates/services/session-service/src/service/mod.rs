//! Session service business logic.

mod session_service;

pub use session_service::{Authenticator, Claims, LoginSession, SessionService, TokenResponse};
