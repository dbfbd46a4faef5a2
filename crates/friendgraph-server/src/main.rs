//! Binary entrypoint for the friendgraph HTTP server.
//!
//! Configuration comes from environment variables, see
//! [`ServerConfig::from_env`]. A data file that is missing or fails to load
//! stops the process before it starts listening.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use friendgraph_server::config::ServerConfig;
use friendgraph_server::router::build_router;
use friendgraph_server::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(
                "failed to load data file {}: {}",
                config.data_path.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    let app = build_router(state.clone());

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "friendgraph server listening on {} (save policy: {})",
        addr,
        config.save_policy
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {}", e);
        return ExitCode::FAILURE;
    }

    match state.flush().await {
        Ok(true) => tracing::info!("graph saved on shutdown"),
        Ok(false) => {}
        Err(e) => {
            tracing::error!("failed to save graph on shutdown: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
