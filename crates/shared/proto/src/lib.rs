//! gRPC protocol buffer definitions.
//!
//! - SessionService: agency registration, login, token verification and
//!   agency approval
//! - AgentService / TodoService: back-office collections

/// Session service definitions.
pub mod session {
    tonic::include_proto!("session");
}

/// Back-office data service definitions.
pub mod backoffice {
    tonic::include_proto!("backoffice");
}

// Re-export commonly used items
pub use backoffice::agent_service_client::AgentServiceClient;
pub use backoffice::agent_service_server::{AgentService, AgentServiceServer};
pub use backoffice::todo_service_client::TodoServiceClient;
pub use backoffice::todo_service_server::{TodoService, TodoServiceServer};
pub use session::session_service_client::SessionServiceClient;
pub use session::session_service_server::{SessionService, SessionServiceServer};
