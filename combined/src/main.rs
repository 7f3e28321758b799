//! Combined binary for development - runs the gateway and both services in
//! one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "travel-backoffice")]
#[command(about = "Travel agency back-office, all services in one process")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every service in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "3000")]
        gateway_port: u16,
        #[arg(long, default_value = "50051")]
        session_port: u16,
        #[arg(long, default_value = "50052")]
        backoffice_port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            gateway_port,
            session_port,
            backoffice_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Gateway:            http://{}:{}", host, gateway_port);
            info!("  Session service:    http://{}:{}", host, session_port);
            info!("  Back-office service: http://{}:{}", host, backoffice_port);

            let backoffice_host = host.clone();
            let backoffice_handle = tokio::spawn(async move {
                if let Err(e) =
                    backoffice_service_lib::run_embedded(&backoffice_host, backoffice_port).await
                {
                    error!("Back-office service failed: {}", e);
                }
            });

            let session_host = host.clone();
            let session_handle = tokio::spawn(async move {
                if let Err(e) = session_service_lib::run_embedded(&session_host, session_port).await
                {
                    error!("Session service failed: {}", e);
                }
            });

            // Gateway clients connect lazily; until the services are up,
            // protected routes answer 503.
            let gateway_host = host.clone();
            let gateway_handle = tokio::spawn(async move {
                if let Err(e) = gateway_lib::run_embedded(
                    &gateway_host,
                    gateway_port,
                    session_port,
                    backoffice_port,
                )
                .await
                {
                    error!("Gateway failed: {}", e);
                }
            });

            // Any exit means a failure
            tokio::select! {
                _ = backoffice_handle => {
                    error!("Back-office service exited unexpectedly");
                }
                _ = session_handle => {
                    error!("Session service exited unexpectedly");
                }
                _ = gateway_handle => {
                    error!("Gateway exited unexpectedly");
                }
            }
        }
    }

    Ok(())
}
