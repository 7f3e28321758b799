//! Repository layer for the back-office collections.

mod agent_repository;
mod memory_store;
mod seed;
mod todo_repository;

pub use agent_repository::AgentRepository;
pub use memory_store::MemoryStore;
pub use seed::{demo_agents, demo_todos};
pub use todo_repository::TodoRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use agent_repository::MockAgentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use todo_repository::MockTodoRepository;
