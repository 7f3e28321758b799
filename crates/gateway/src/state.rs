//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::{AgentClient, SessionClient, TodoClient};
use crate::config::GatewayConfig;
use crate::middleware::Cache;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub session_client: Arc<SessionClient>,
    pub agent_client: Arc<AgentClient>,
    pub todo_client: Arc<TodoClient>,
    pub cache: Arc<Cache>,
    pub config: GatewayConfig,
}

impl AppState {
    pub fn new(
        session_client: Arc<SessionClient>,
        agent_client: Arc<AgentClient>,
        todo_client: Arc<TodoClient>,
        cache: Arc<Cache>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            session_client,
            agent_client,
            todo_client,
            cache,
            config,
        }
    }
}
