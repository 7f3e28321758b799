//! Back-office business logic.

mod agent_service;
mod todo_service;

pub use agent_service::{AgentManager, AgentService};
pub use todo_service::{TodoManager, TodoService};
