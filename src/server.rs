//! Server Module
//!
//! Runs the router until a shutdown signal arrives, then gives in-flight
//! requests a bounded time to finish.

use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

/// How serving ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every connection finished before the deadline
    Graceful,
    /// The deadline passed with requests still running
    TimedOut,
}

// == Serve ==
/// Serves `app` on `listener` until `shutdown` resolves, then waits at most
/// `drain_timeout` for open connections to finish.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> io::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (draining_tx, draining_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let _ = draining_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        biased;

        result = &mut server => result.map(|()| ShutdownOutcome::Graceful),
        Ok(()) = draining_rx => {
            info!(timeout_secs = drain_timeout.as_secs_f64(), "draining in-flight requests");
            match tokio::time::timeout(drain_timeout, &mut server).await {
                Ok(result) => result.map(|()| ShutdownOutcome::Graceful),
                Err(_) => {
                    error!(
                        timeout_secs = drain_timeout.as_secs_f64(),
                        "failed to shut down gracefully: requests still running"
                    );
                    Ok(ShutdownOutcome::TimedOut)
                }
            }
        }
    }
}
