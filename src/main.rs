// medchat-relay - bullet-point medical Q&A over a Groq-compatible LLM API
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use medchat_relay::cli::Args;
use medchat_relay::config::{api_key_from_env, AppConfig};
use medchat_relay::gateway::GatewayClient;
use medchat_relay::server::create_router;
use medchat_relay::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Phase 0: Pick up .env before anything reads the environment
    let dotenv_path = dotenvy::dotenv().ok();

    // Phase 1: Load configuration (file < env < CLI)
    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting medchat-relay v{}", env!("CARGO_PKG_VERSION"));
    match dotenv_path {
        Some(path) => info!("Loaded environment from {}", path.display()),
        None => debug!("No .env file found"),
    }

    // Phase 3: Credential is mandatory; refuse to start without it
    let api_key = api_key_from_env()?;

    // Phase 4: Build gateway client
    let gateway_client = GatewayClient::new(&config.gateway, api_key)?;
    info!(
        "Gateway: {} (models: {}, {})",
        config.gateway.api_url, config.gateway.primary_model, config.gateway.secondary_model
    );

    // Phase 5: Build and start HTTP server
    let app = create_router(config.clone(), gateway_client)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
