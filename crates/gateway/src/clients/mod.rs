//! gRPC clients for calling the back-office services.

mod agent_client;
mod convert;
mod session_client;
mod todo_client;

pub use agent_client::AgentClient;
pub use session_client::{LoginResult, SessionClient, TokenResponse, TokenVerifier};
pub use todo_client::TodoClient;

#[cfg(test)]
pub use session_client::MockTokenVerifier;
