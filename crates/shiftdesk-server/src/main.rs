mod config;
mod error;
mod handlers;
mod router;
mod store;
mod telemetry;

use std::net::SocketAddr;
use std::process;

use tokio::net::TcpListener;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() {
    telemetry::init_telemetry();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            process::exit(1);
        }
    };

    let shifts = match store::load(&config) {
        Ok(shifts) => shifts,
        Err(e) => {
            tracing::error!(error = %e, "failed to load shifts");
            process::exit(1);
        }
    };
    let count = shifts.len();

    let app = router::build(shifts, &config.cors_origins);
    let addr = SocketAddr::from((config.host, config.port));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind address");
            process::exit(1);
        }
    };

    tracing::info!(%addr, shifts = count, "starting shiftdesk feed server");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
        process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
