//! Session Service Library
//!
//! Agency registration, login, token verification and agency approval via
//! gRPC. Runs standalone or embedded in the combined binary.

pub mod config;
pub mod directory;
pub mod grpc;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::{info, warn};

use crate::config::SessionServiceConfig;
use crate::directory::{demo_users, MemoryDirectory};
use crate::grpc::SessionGrpcService;
use crate::service::Authenticator;
use domain::Password;

/// Run the session service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = SessionServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Build the directory, seeded with demo accounts when a seed password is set.
fn build_directory(config: &SessionServiceConfig) -> Result<MemoryDirectory, Box<dyn std::error::Error>> {
    match &config.seed_password {
        Some(password) => {
            let hash = Password::new(password)?.into_string();
            let users = demo_users(&hash);
            info!("Seeded {} demo accounts", users.len());
            Ok(MemoryDirectory::with_users(users))
        }
        None => {
            warn!("SESSION_SEED_PASSWORD not set, starting with an empty directory");
            Ok(MemoryDirectory::new())
        }
    }
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: SessionServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let directory = Arc::new(build_directory(&config)?);
    let session_service = Arc::new(Authenticator::new(directory, config.jwt.clone()));
    let grpc_service = SessionGrpcService::new(session_service);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Session service listening on {}", addr);

    Server::builder()
        .add_service(proto::SessionServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
