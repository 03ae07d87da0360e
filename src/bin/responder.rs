// src/bin/responder.rs
use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use service_probe::config::{self, Config};
use service_probe::responder::Responder;
use service_probe::server::{RequestHandler, ServerBuilder};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("service_probe=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Load configuration; without a config file the shipped defaults apply.
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            config::load_config(&path).await?
        }
        None => Config::default(),
    };

    let addr = config.server.socket_addr();
    let responder = Arc::new(Responder::new(config.service));
    info!(
        "Serving {} registered endpoints",
        responder.registry().len()
    );

    let handler = RequestHandler::new(responder);
    let server = ServerBuilder::new(addr).with_handler(handler).serve();

    tokio::select! {
        result = server => result?,
        _ = shutdown_signal() => {}
    }

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
