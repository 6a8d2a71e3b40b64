//! chatX - chat and message service with an LRU read cache

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use chatx::server::{self, ShutdownOutcome};
use chatx::storage::MemoryStorage;
use chatx::{create_router, logging, AppState, Config};

/// Main entry point for the chatX server.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing (stdout or `LOG_DIR/app.log`)
/// 3. Create storage, cache and chat service
/// 4. Create Axum router with all endpoints
/// 5. Serve until SIGINT/SIGTERM, drain for at most `SHUTDOWN_TIMEOUT`
/// 6. Release the service
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init(&config);

    info!("Starting chatX server");
    info!(
        "Configuration loaded: port={}, get_limit_max={}, request_logging={}, shutdown_timeout={}s",
        config.server_port,
        config.service.get_limit_max,
        config.request_logging,
        config.shutdown_timeout.as_secs()
    );

    let state = AppState::from_config(&config, Arc::new(MemoryStorage::new()));
    let service = state.service.clone();

    let cache = service.cache();
    if cache.is_enabled() {
        info!(
            capacity = cache.capacity(),
            max_messages = cache.max_entry_size(),
            "Chat cache enabled"
        );
    } else {
        info!(configured = config.cache.capacity, "Chat cache disabled");
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    let served = server::serve(listener, app, shutdown_signal(), config.shutdown_timeout).await;

    // Release the cache and storage even when serving failed or timed out
    service.close().await;

    match served.context("server error")? {
        ShutdownOutcome::Graceful => info!("Server shutdown complete"),
        ShutdownOutcome::TimedOut => info!("Server stopped after shutdown timeout"),
    }
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
