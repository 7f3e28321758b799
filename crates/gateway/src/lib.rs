//! API gateway library.
//!
//! HTTP/JSON front of the back-office: resolves sessions, applies the route
//! guard and module permissions, then forwards to the gRPC services.

pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::clients::{AgentClient, SessionClient, TodoClient};
use crate::config::GatewayConfig;
use crate::middleware::Cache;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    session_port: u16,
    backoffice_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    config.host = host.to_string();
    config.port = port;
    config.session_service.endpoint = format!("http://{}:{}", local_host(host), session_port);
    config.backoffice_service.endpoint =
        format!("http://{}:{}", local_host(host), backoffice_port);

    run_server(config).await
}

/// Services bound to the wildcard address are reached over loopback.
fn local_host(host: &str) -> &str {
    if host == "0.0.0.0" {
        "127.0.0.1"
    } else {
        host
    }
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session_client = Arc::new(SessionClient::connect(&config.session_service)?);
    let agent_client = Arc::new(AgentClient::connect(&config.backoffice_service)?);
    let todo_client = Arc::new(TodoClient::connect(&config.backoffice_service)?);

    let cache = Arc::new(Cache::connect(&config.cache).await?);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState::new(session_client, agent_client, todo_client, cache, config);

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
