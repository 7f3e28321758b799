//! Back-office Service Library
//!
//! Agent and todo collections via gRPC. Runs standalone or embedded in the
//! combined binary.

pub mod config;
pub mod grpc;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::BackofficeServiceConfig;
use crate::grpc::{AgentGrpcService, TodoGrpcService};
use crate::repository::{demo_agents, demo_todos, MemoryStore};
use crate::service::{AgentManager, TodoManager};
use domain::{Agent, Todo};

/// Run the back-office service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = BackofficeServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Build both stores, with the demo collections when seeding is enabled.
pub fn build_stores(config: &BackofficeServiceConfig) -> (MemoryStore<Agent>, MemoryStore<Todo>) {
    if config.seed_demo_data {
        info!("Seeding demo agents and todos");
        (
            MemoryStore::with_items(demo_agents()),
            MemoryStore::with_items(demo_todos()),
        )
    } else {
        (MemoryStore::new(), MemoryStore::new())
    }
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: BackofficeServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let (agents, todos) = build_stores(&config);

    let agent_service = Arc::new(AgentManager::new(Arc::new(agents)));
    let todo_service = Arc::new(TodoManager::new(Arc::new(todos)));

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Back-office service listening on {}", addr);

    Server::builder()
        .add_service(proto::AgentServiceServer::new(AgentGrpcService::new(agent_service)))
        .add_service(proto::TodoServiceServer::new(TodoGrpcService::new(todo_service)))
        .serve(addr)
        .await?;

    Ok(())
}
